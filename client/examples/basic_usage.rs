use std::process::exit;

use blacklist_alliance_client::{Client, ClientError};
use tracing_subscriber::EnvFilter;

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    // Expect the endpoint, the API key and the phone number, in that order
    let args: Vec<String> = std::env::args().collect();
    if args.len() < 4 {
        eprintln!("Usage: {} <endpoint> <api_key> <phone>", args[0]);
        exit(1);
    }

    let client = match Client::builder().endpoint(&args[1]).api_key(&args[2]).build() {
        Ok(client) => client,
        Err(err) => {
            eprintln!("{}", err);
            exit(1);
        }
    };

    match client.lookup(&args[3]) {
        Ok(result) => {
            println!("sid:      {}", result.sid().unwrap_or("-"));
            println!("message:  {}", result.message().unwrap_or("-"));
            println!("code:     {}", result.code().unwrap_or("-"));
            println!("results:  {}", result.results().unwrap_or("-"));
            println!("wireless: {}", result.wireless().unwrap_or("-"));
            if result.is_blacklisted() {
                println!("{} is blacklisted", args[3]);
            }
        }
        Err(ClientError::InvalidPhoneNumber(message)) => {
            eprintln!("Rejected phone number: {}", message);
            exit(2);
        }
        Err(ClientError::InvalidApiKey(message)) => {
            eprintln!("Check your API key and whitelisted IP: {}", message);
            exit(3);
        }
        Err(err) => {
            eprintln!("Lookup failed: {}", err);
            exit(1);
        }
    }
}
