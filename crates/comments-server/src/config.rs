use std::env;
use std::path::PathBuf;

#[derive(Debug, Clone)]
pub struct Config {
    pub port: u16,
    pub comments_file: PathBuf,
}

impl Config {
    pub fn from_env() -> anyhow::Result<Self> {
        Ok(Self {
            port: env::var("PORT")
                .unwrap_or_else(|_| "3000".to_string())
                .parse()?,
            comments_file: env::var("COMMENTS_FILE")
                .unwrap_or_else(|_| "data/comments.json".to_string())
                .into(),
        })
    }
}
