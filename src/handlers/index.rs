/// GET / - Liveness check
pub async fn index() -> &'static str {
    "Photo upload relay is running"
}
