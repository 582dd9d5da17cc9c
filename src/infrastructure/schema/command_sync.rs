use async_trait::async_trait;
use tokio::process::Command;
use tracing::{debug, info};

use crate::domain::SchemaSync;
use crate::support::ProvisionError;

/// Runs external migration / code-generation commands in order.
///
/// Each entry is split on whitespace into program and arguments; no shell
/// is involved. The first failing command aborts the sync.
#[derive(Debug, Clone)]
pub struct CommandSync {
    commands: Vec<String>,
}

impl CommandSync {
    pub fn new(commands: Vec<String>) -> Self {
        Self { commands }
    }

    async fn run_one(&self, command: &str) -> Result<(), ProvisionError> {
        let mut parts = command.split_whitespace();
        let program = parts.next().ok_or_else(|| ProvisionError::SchemaSync {
            command: command.to_string(),
            reason: "empty command".to_string(),
        })?;

        info!("🔧 Running `{}`...", command);
        let output = Command::new(program)
            .args(parts)
            .output()
            .await
            .map_err(|e| ProvisionError::SchemaSync {
                command: command.to_string(),
                reason: e.to_string(),
            })?;

        let stdout = String::from_utf8_lossy(&output.stdout);
        if !stdout.trim().is_empty() {
            debug!("{}", stdout.trim());
        }

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            let reason = match stderr.trim() {
                "" => format!("exited with {}", output.status),
                msg => format!("exited with {}: {}", output.status, msg),
            };
            return Err(ProvisionError::SchemaSync {
                command: command.to_string(),
                reason,
            });
        }

        info!("✅ `{}` completed", command);
        Ok(())
    }
}

#[async_trait]
impl SchemaSync for CommandSync {
    async fn apply_pending(&self) -> Result<(), ProvisionError> {
        for command in &self.commands {
            self.run_one(command).await?;
        }
        Ok(())
    }

    fn describe(&self) -> String {
        format!("{} external command(s)", self.commands.len())
    }
}
