//! dauth verification service entry point

use anyhow::Context;
use clap::{Arg, Command};
use std::net::SocketAddr;
use tracing::info;

mod handlers;
mod middleware;
mod server;

use server::AuthServer;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize tracing
    tracing_subscriber::fmt::init();

    let matches = Command::new("dauth-server")
        .version("0.1.0")
        .about("Request-authentication service for Demo App APIs")
        .arg(
            Arg::new("bind")
                .long("bind")
                .value_name("ADDR")
                .help("Bind address")
                .default_value("127.0.0.1:3000"),
        )
        .subcommand(
            Command::new("keygen").about("Generate a fresh access/secret key pair and exit"),
        )
        .get_matches();

    if matches.subcommand_matches("keygen").is_some() {
        let (access_key, secret_key) = dauth_core::key_pair();
        let credential = serde_json::json!({
            "access_key": access_key.as_str(),
            "secret_key": secret_key.as_str(),
        });
        println!("{}", serde_json::to_string_pretty(&credential)?);
        return Ok(());
    }

    let bind_addr: SocketAddr = matches
        .get_one::<String>("bind")
        .unwrap()
        .parse()
        .context("invalid bind address")?;

    info!("Starting dauth server");
    info!("Bind address: {}", bind_addr);

    AuthServer::new()
        .serve(bind_addr)
        .await
        .context("server terminated")?;

    Ok(())
}
