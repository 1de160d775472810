mod test_server;

#[allow(unused_imports)]
pub use test_server::{
    TEST_FOLDER_ID, TestServer, default_oauth_settings, interactive_gate, valid_token_set,
};
