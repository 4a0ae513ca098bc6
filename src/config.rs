use clap::Parser;
use serde::Deserialize;
use std::net::IpAddr;

use handle_errors::Error;

use crate::types::quiz::QuizOrder;

/// 명령줄 인수. 설정 파일과 환경 변수 위에 덮어쓴다.
#[derive(Parser, Debug, Default, PartialEq)]
#[clap(author, version, about = "Trivia question API")]
pub struct Args {
    /// 설정 파일 경로 (확장자 생략 가능)
    #[clap(short, long, default_value = "setup")]
    pub config: String,
    /// 서버 포트
    #[clap(short, long)]
    pub port: Option<u16>,
    /// PostgreSQL 대신 메모리 저장소를 쓴다
    #[clap(long)]
    pub in_memory: bool,
}

#[derive(Debug, Deserialize, Clone, PartialEq)]
pub struct Config {
    pub log_level: String,
    pub host: IpAddr,
    pub port: u16,
    pub database_host: String,
    pub database_port: u16,
    pub database_name: String,
    pub database_user: String,
    pub database_password: String,
    pub in_memory: bool,
    /// 전체 목록의 `current_category`. 없으면 페이지 첫 질문의 카테고리를 쓴다.
    pub default_category: Option<i32>,
    pub quiz_order: QuizOrder,
}

impl Config {
    /// `.env` -> `setup.toml` -> `TRIVIA_*` 환경 변수 -> 명령줄 순으로 덮어쓴다.
    pub fn new() -> Result<Config, Error> {
        dotenv::dotenv().ok();
        let args = Args::parse();
        Config::load(&args)
    }

    pub fn load(args: &Args) -> Result<Config, Error> {
        let mut config: Config = config::Config::builder()
            .set_default("log_level", "trivia_api=info,warp=error")
            .and_then(|builder| builder.set_default("host", "127.0.0.1"))
            .and_then(|builder| builder.set_default("port", 3030_i64))
            .and_then(|builder| builder.set_default("database_host", "localhost"))
            .and_then(|builder| builder.set_default("database_port", 5432_i64))
            .and_then(|builder| builder.set_default("database_name", "trivia"))
            .and_then(|builder| builder.set_default("database_user", "postgres"))
            .and_then(|builder| builder.set_default("database_password", ""))
            .and_then(|builder| builder.set_default("in_memory", false))
            .and_then(|builder| builder.set_default("quiz_order", "lowest-id"))
            .map_err(Error::ConfigError)?
            .add_source(config::File::with_name(&args.config).required(false))
            .add_source(config::Environment::with_prefix("TRIVIA"))
            .build()
            .and_then(|settings| settings.try_deserialize())
            .map_err(Error::ConfigError)?;

        if let Some(port) = args.port {
            config.port = port;
        }
        config.in_memory |= args.in_memory;

        Ok(config)
    }

    pub fn database_url(&self) -> String {
        if self.database_password.is_empty() {
            format!(
                "postgres://{}@{}:{}/{}",
                self.database_user, self.database_host, self.database_port, self.database_name
            )
        } else {
            format!(
                "postgres://{}:{}@{}:{}/{}",
                self.database_user,
                self.database_password,
                self.database_host,
                self.database_port,
                self.database_name
            )
        }
    }
}
