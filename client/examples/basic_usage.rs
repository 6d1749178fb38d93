use std::process::exit;

use clockify_client::{ClientConfig, Pagination, Result};
use reqwest::Method;
use serde::Deserialize;
use tracing_subscriber::EnvFilter;

#[derive(Debug, Deserialize)]
struct Workspace {
    id: String,
    name: String,
}

#[derive(Debug, Deserialize)]
struct User {
    id: String,
    email: String,
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    // Expect the API key as the first argument and an optional base URL after
    let args: Vec<String> = std::env::args().collect();
    if args.len() < 2 {
        eprintln!("Usage: {} <api_key> [base_url]", args[0]);
        exit(1);
    }

    let mut config = ClientConfig::new(args[1].clone()).with_debug(true);
    if let Some(base_url) = args.get(2) {
        config = config.with_base_url(base_url.clone());
    }
    let client = config.build()?;

    // Who owns the key
    let mut user: Option<User> = None;
    client.execute_into(client.new_request(Method::GET, "user")?, &mut user)?;
    if let Some(user) = &user {
        println!("Authenticated as {} ({})", user.email, user.id);
    }

    // First page of workspaces
    let mut workspaces: Vec<Workspace> = Vec::new();
    let req = client.new_request_with(Method::GET, "workspaces", &Pagination::new(1, 10))?;
    let response = client.execute_into(req, &mut workspaces)?;
    println!("Status {}: {} workspaces", response.status, workspaces.len());
    for workspace in &workspaces {
        println!("- {}: {}", workspace.id, workspace.name);
    }

    // A missing resource comes back as the not-found error
    match client.execute(client.new_request(Method::GET, "workspaces/does-not-exist")?) {
        Err(err) if err.is_not_found() => println!("Workspace does-not-exist: {}", err),
        Err(err) => return Err(err),
        Ok(_) => println!("Workspace does-not-exist unexpectedly exists"),
    }

    Ok(())
}
