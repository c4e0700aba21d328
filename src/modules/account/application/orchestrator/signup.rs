use std::sync::Arc;
use std::time::Duration;

use crate::modules::account::application::use_cases::create_account::{
    CreateAccountError, CreateAccountInput, CreateAccountOutput, ICreateAccountUseCase,
};
use crate::modules::email::application::ports::outgoing::AccountNotifier;

#[derive(Debug)]
pub struct SignupOutput {
    pub account_id: uuid::Uuid,
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub message: String,
}

impl From<CreateAccountOutput> for SignupOutput {
    fn from(output: CreateAccountOutput) -> Self {
        Self {
            account_id: output.account_id,
            first_name: output.first_name,
            last_name: output.last_name,
            email: output.email,
            message: "Account created. Please check your email to verify your account."
                .to_string(),
        }
    }
}

#[derive(Debug, thiserror::Error)]
pub enum SignupError {
    #[error("Account creation failed: {0}")]
    CreateAccountFailed(#[from] CreateAccountError),
}

/// Signup = create the row, then mail the verification link.
///
/// The mail leaves on a background task with bounded retries. A committed
/// account row is never rolled back over a mail failure; the user can
/// re-trigger verification from the login error path.
#[derive(Clone)]
pub struct SignupOrchestrator {
    create_account: Arc<dyn ICreateAccountUseCase>,
    notifier: Arc<dyn AccountNotifier>,
}

impl SignupOrchestrator {
    pub fn new(
        create_account: Arc<dyn ICreateAccountUseCase>,
        notifier: Arc<dyn AccountNotifier>,
    ) -> Self {
        Self {
            create_account,
            notifier,
        }
    }

    pub async fn signup(&self, input: CreateAccountInput) -> Result<SignupOutput, SignupError> {
        let created = self.create_account.execute(input).await?;

        let notifier = self.notifier.clone();
        let account = created.clone();

        tokio::spawn(async move {
            let max_retries = 3;
            for attempt in 1..=max_retries {
                match notifier
                    .send_verification_email(
                        account.account_id,
                        &account.first_name,
                        &account.last_name,
                        &account.email,
                    )
                    .await
                {
                    Ok(_) => return,
                    Err(e) if attempt < max_retries => {
                        tracing::warn!(
                            "Verification email attempt {}/{} failed for account {}: {}. Retrying...",
                            attempt,
                            max_retries,
                            account.account_id,
                            e
                        );
                        tokio::time::sleep(Duration::from_secs(2_u64.pow(attempt))).await;
                    }
                    Err(e) => {
                        tracing::error!(
                            "All {} verification email attempts failed for account {}: {}",
                            max_retries,
                            account.account_id,
                            e
                        );
                    }
                }
            }
        });

        Ok(created.into())
    }
}
