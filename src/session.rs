/// Explicit session state
///
/// Holds the configuration, the mirror-node client and the connected account.
/// Callers own the session and pass it where account-bound data is needed.
use crate::config::Config;
use crate::errors::CoreError;
use crate::logger::{self, LogTag};
use crate::tokens::{is_ledger_id_valid, MirrorNodeClient, Token, WalletBalance};

pub struct Session {
    config: Config,
    client: MirrorNodeClient,
    account_id: Option<String>,
}

impl Session {
    pub fn new(config: Config) -> Self {
        let client = MirrorNodeClient::new(&config.mirror_node);
        Self {
            config,
            client,
            account_id: None,
        }
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    pub fn client(&self) -> &MirrorNodeClient {
        &self.client
    }

    /// Bind the session to an account id (`shard.realm.num`)
    pub fn connect(&mut self, account_id: &str) -> Result<(), CoreError> {
        let account_id = account_id.trim();
        if !is_ledger_id_valid(account_id) {
            return Err(CoreError::InvalidIdentifier {
                value: account_id.to_string(),
            });
        }

        if let Some(previous) = self.account_id.replace(account_id.to_string()) {
            logger::info(
                LogTag::Session,
                &format!("Switched account {} -> {}", previous, account_id),
            );
        } else {
            logger::info(LogTag::Session, &format!("Connected account {}", account_id));
        }
        Ok(())
    }

    pub fn disconnect(&mut self) {
        if let Some(previous) = self.account_id.take() {
            logger::info(LogTag::Session, &format!("Disconnected account {}", previous));
        }
    }

    pub fn is_connected(&self) -> bool {
        self.account_id.is_some()
    }

    pub fn account_id(&self) -> Option<&str> {
        self.account_id.as_deref()
    }

    fn require_account(&self) -> Result<&str, CoreError> {
        self.account_id.as_deref().ok_or(CoreError::NotConnected)
    }

    pub async fn wallet_balance(&self) -> Result<WalletBalance, CoreError> {
        let account = self.require_account()?;
        Ok(self.client.get_wallet_balance(account).await?)
    }

    pub async fn associated_tokens(&self) -> Result<Vec<String>, CoreError> {
        let account = self.require_account()?;
        Ok(self.client.get_associated_tokens(account).await?)
    }

    /// Tokens from `tokens` the connected account still has to associate
    pub async fn tokens_to_associate(&self, tokens: &[Token]) -> Result<Vec<Token>, CoreError> {
        let associated = self.associated_tokens().await?;
        Ok(crate::staking::tokens_to_associate(tokens, &associated))
    }
}
