//! `pagenode` — command-line front end for the page Node service.
//!
//! Provides two subcommands:
//!
//! - **`types`** — list the node types the service supports.
//! - **`request`** — send a request for a node and print the outcome: the
//!   rendered body, the raw body, or the redirect target.
//!
//! The service endpoint comes from `--url` or `PAGENODE_URL`.

use std::io::{self, Write};
use std::process;

use clap::{Parser, Subcommand};
use pagenode_api::{Disposition, NodeInfo, Request, UserSession, Values, SEE_OTHER};
use pagenode_client::{ClientConfig, NodeClient};

/// pagenode — page Node service CLI
///
/// Talk to a Node service the way a rendering front end does.
#[derive(Parser)]
#[command(name = "pagenode", version, about, long_about = None)]
struct Cli {
    /// RPC endpoint of the Node service.
    #[arg(long, env = "PAGENODE_URL", default_value = ClientConfig::DEFAULT_URL)]
    url: String,

    /// Per-call timeout in seconds.
    #[arg(long, env = "PAGENODE_TIMEOUT_SECS", default_value_t = ClientConfig::DEFAULT_TIMEOUT_SECS)]
    timeout: u64,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// List all node types the service supports, one per line.
    Types,

    /// Send a request for a node and print the result.
    ///
    /// Embedded bodies and raw bodies are written to stdout as-is. A redirect
    /// prints the target and exits 0.
    ///
    /// Examples:
    ///   pagenode request / --site example
    ///   pagenode request /about --action edit --method POST \
    ///     --session '{"login":"admin"}' -f title="About us"
    Request {
        /// Path of the node, e.g. `/about/team`.
        path: String,

        /// Site the node belongs to.
        #[arg(long, default_value = "default")]
        site: String,

        /// Action to perform on the node (e.g. `edit`). Empty means view.
        #[arg(short = 'a', long, default_value = "")]
        action: String,

        /// Transport method of the request.
        #[arg(short = 'm', long, default_value = "GET")]
        method: String,

        /// Query parameter as KEY=VALUE (url-encoded). Repeatable.
        #[arg(short = 'q', long = "query", value_name = "KEY=VALUE")]
        query: Vec<String>,

        /// Form field as KEY=VALUE (url-encoded). Repeatable.
        #[arg(short = 'f', long = "form", value_name = "KEY=VALUE")]
        form: Vec<String>,

        /// User session as a JSON value, passed through to the service.
        #[arg(long, value_name = "JSON")]
        session: Option<String>,

        /// Print the whole response as JSON instead of acting on it.
        #[arg(long)]
        json: bool,
    },
}

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "warn".into()),
        )
        .with_writer(io::stderr)
        .init();

    let cli = Cli::parse();
    let config = ClientConfig {
        url: cli.url,
        timeout_secs: cli.timeout,
    };
    let client = NodeClient::connect(&config)
        .unwrap_or_else(|e| fatal(&format!("failed to set up client: {e}")));

    match cli.command {
        Command::Types => {
            let types = client.get_node_types().await.unwrap_or_else(|e| fail(&e));
            for t in types {
                println!("{t}");
            }
        }

        Command::Request {
            path,
            site,
            action,
            method,
            query,
            form,
            session,
            json,
        } => {
            let req = build_request(path, site, action, method, &query, &form, session.as_deref())
                .unwrap_or_else(|e| fatal(&e));
            let res = client.request(&req).await.unwrap_or_else(|e| fail(&e));

            if json {
                let out = serde_json::to_string_pretty(&res)
                    .unwrap_or_else(|e| fatal(&format!("failed to encode response: {e}")));
                println!("{out}");
                return;
            }

            match res.disposition() {
                Disposition::Redirect(target) => println!("{SEE_OTHER} See Other: {target}"),
                Disposition::Raw(body) | Disposition::Embed(body) => {
                    let mut stdout = io::stdout().lock();
                    stdout
                        .write_all(body)
                        .and_then(|()| stdout.flush())
                        .unwrap_or_else(|e| fatal(&format!("failed to write body: {e}")));
                }
            }
        }
    }
}

/// Assemble a [`Request`] from command-line arguments.
fn build_request(
    path: String,
    site: String,
    action: String,
    method: String,
    query: &[String],
    form: &[String],
    session: Option<&str>,
) -> Result<Request, String> {
    let session = match session {
        Some(raw) => UserSession::new(
            serde_json::from_str(raw).map_err(|e| format!("invalid --session JSON: {e}"))?,
        ),
        None => UserSession::anonymous(),
    };
    Ok(Request::new(site, NodeInfo::new(path))
        .with_action(action)
        .with_method(method)
        .with_query(parse_pairs("--query", query)?)
        .with_form_data(parse_pairs("--form", form)?)
        .with_session(session))
}

/// Parse repeated `KEY=VALUE` arguments into [`Values`].
fn parse_pairs(flag: &str, pairs: &[String]) -> Result<Values, String> {
    let mut values = Values::new();
    for raw in pairs {
        if !raw.contains('=') {
            return Err(format!("invalid {flag} {raw:?}: expected KEY=VALUE"));
        }
        let parsed = Values::parse(raw).map_err(|e| format!("invalid {flag} {raw:?}: {e}"))?;
        for (k, v) in parsed.iter() {
            values.add(k, v);
        }
    }
    Ok(values)
}

/// Report a failed service call and exit with code 1.
fn fail(e: &dyn std::error::Error) -> ! {
    eprintln!("pagenode: {e}");
    process::exit(1);
}

/// Print an error message to stderr and exit with code 2.
fn fatal(msg: &str) -> ! {
    eprintln!("pagenode: {msg}");
    process::exit(2);
}
