pub mod admin_accounts;
pub mod change_password;
pub mod create_account;
pub mod fetch_profile;
pub mod login;
pub mod logout;
pub mod refresh_token;
pub mod remove_profile;
pub mod request_reset_link;
pub mod reset_password;
pub mod reset_with_token;
pub mod restore_profile;
pub mod role_gate;
pub mod update_profile;
pub mod verify_email;
