//! CLI runner - executes commands

use crate::cli::commands::{Cli, Commands};
use crate::client::Client;
use crate::config::ClientConfig;
use crate::error::{Error, Result};
use crate::pagination::{Cursor, ListParams};
use crate::types::JsonValue;
use serde_json::json;
use std::time::Instant;
use tracing::info;

/// CLI runner
pub struct Runner {
    cli: Cli,
}

impl Runner {
    /// Create a new runner
    pub fn new(cli: Cli) -> Self {
        Self { cli }
    }

    /// Run the CLI command
    pub async fn run(&self) -> Result<()> {
        match &self.cli.command {
            Commands::List {
                endpoint,
                items_key,
                page_size,
                filters,
                sort,
                limit,
                pretty,
            } => {
                let mut params = ListParams::new();
                for (key, value) in filters {
                    params = params.filter(key, value);
                }
                if let Some(size) = page_size {
                    params = params.page_size(*size);
                }
                if let Some(sort) = sort {
                    params = params.sort(sort);
                }
                self.list(endpoint, items_key, params, *limit, *pretty)
                    .await
            }
            Commands::Cursor { link, body } => {
                let cursor = cursor_from_args(link.as_deref(), body.as_deref())?;
                println!("{}", serde_json::to_string_pretty(&describe(&cursor))?);
                Ok(())
            }
        }
    }

    /// Config file (if any), then `PAGEWISE_*` environment, then flags
    fn load_config(&self) -> Result<ClientConfig> {
        let mut config = match &self.cli.config {
            Some(path) => ClientConfig::read_file(path)?,
            None => ClientConfig::new(String::new()),
        }
        .with_env_overrides()?;

        if let Some(base_url) = &self.cli.base_url {
            config.base_url.clone_from(base_url);
        }
        if let Some(dialect) = self.cli.dialect {
            config.dialect = dialect;
        }

        config.validate()?;
        Ok(config)
    }

    async fn list(
        &self,
        endpoint: &str,
        items_key: &str,
        params: ListParams,
        limit: Option<usize>,
        pretty: bool,
    ) -> Result<()> {
        let start = Instant::now();
        let client = Client::new(self.load_config()?)?;
        let mut paginator = client.list_with(endpoint, items_key, params, Ok::<JsonValue, Error>);
        let limit = limit.unwrap_or(usize::MAX);

        let mut count = 0;
        while count < limit {
            let Some(item) = paginator.next().await? else {
                break;
            };
            let line = if pretty {
                serde_json::to_string_pretty(&item)?
            } else {
                serde_json::to_string(&item)?
            };
            println!("{line}");
            count += 1;
        }

        info!(
            endpoint,
            dialect = %paginator.dialect(),
            items = count,
            pages = paginator.pages_fetched(),
            elapsed_ms = start.elapsed().as_millis() as u64,
            "listing complete"
        );
        Ok(())
    }
}

fn cursor_from_args(link: Option<&str>, body: Option<&str>) -> Result<Cursor> {
    match (link, body) {
        (Some(link), _) => Ok(Cursor::from_link_header(link)),
        (None, Some(body)) => Ok(Cursor::from_body(&serde_json::from_str(body)?)),
        (None, None) => Err(Error::config("either --link or --body is required")),
    }
}

fn describe(cursor: &Cursor) -> JsonValue {
    json!({
        "next": cursor.next(),
        "previous": cursor.previous(),
        "has_next": cursor.has_next(),
        "has_previous": cursor.has_previous(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::Parser;

    #[test]
    fn test_cursor_from_link_arg() {
        let cursor =
            cursor_from_args(Some(r#"<https://x/items?cursor=abc123>; rel="next""#), None).unwrap();
        assert_eq!(
            describe(&cursor),
            json!({"next": "abc123", "previous": null, "has_next": true, "has_previous": false})
        );
    }

    #[test]
    fn test_cursor_from_body_arg() {
        let cursor = cursor_from_args(None, Some(r#"{"previous_cursor": "p"}"#)).unwrap();
        assert_eq!(cursor.previous(), Some("p"));

        assert!(matches!(
            cursor_from_args(None, Some("{oops")),
            Err(Error::JsonParse(_))
        ));
        assert!(cursor_from_args(None, None).is_err());
    }

    #[test]
    fn test_load_config_flags_override_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("client.yaml");
        std::fs::write(&path, "base_url: https://file.example.com\ndialect: new\n").unwrap();

        let cli = Cli::try_parse_from([
            "pagewise",
            "--config",
            path.to_str().unwrap(),
            "--base-url",
            "https://flag.example.com",
            "--dialect",
            "old",
            "cursor",
            "--body",
            "{}",
        ])
        .unwrap();

        let config = Runner::new(cli).load_config().unwrap();
        assert_eq!(config.base_url, "https://flag.example.com");
        assert_eq!(config.dialect, crate::dialect::Dialect::Old);
    }

    #[test]
    fn test_load_config_flag_fixes_invalid_file_url() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("client.yaml");
        std::fs::write(&path, "base_url: not a url
").unwrap();

        let args = |base_url: Option<&str>| {
            let mut args = vec!["pagewise", "--config", path.to_str().unwrap()];
            if let Some(url) = base_url {
                args.extend(["--base-url", url]);
            }
            args.extend(["cursor", "--body", "{}"]);
            Cli::try_parse_from(args).unwrap()
        };

        let config = Runner::new(args(Some("https://flag.example.com")))
            .load_config()
            .unwrap();
        assert_eq!(config.base_url, "https://flag.example.com");

        assert!(Runner::new(args(None)).load_config().is_err());
    }
}
