use std::io;

use cloopen::{ClientConfig, CloopenClient, TemplateSms};
use config::{Config, Environment, File};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("cloopen=info")),
        )
        .init();

    // cloopen.toml is optional; CLOOPEN__ACCOUNT_SID style variables override it.
    let settings = Config::builder()
        .add_source(File::with_name("cloopen").required(false))
        .add_source(Environment::default().separator("__"))
        .build()?;
    let config = ClientConfig::from_config(&settings)?;

    let phone = std::env::var("CLOOPEN_PHONE").map_err(|_| {
        io::Error::new(
            io::ErrorKind::InvalidInput,
            "CLOOPEN_PHONE environment variable is required",
        )
    })?;
    let template = std::env::var("CLOOPEN_TEMPLATE").unwrap_or_else(|_| "login".to_owned());
    let datas = std::env::args().skip(1).collect::<Vec<_>>();

    let client = CloopenClient::try_new(config)?;
    client.text(TemplateSms::new(template, phone, datas)).await?;
    println!("message accepted");

    Ok(())
}
