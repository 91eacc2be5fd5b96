use crate::dispatcher::{DispatchOutcome, Dispatcher, Request};
use crate::handler::{HandlerFn, HandlerResolver, ResponseBody};
use crate::pattern::Params;
use crate::route_file::RouteFile;
use crate::runtime_config::RuntimeConfig;
use anyhow::{anyhow, Context};
use clap::{Parser, Subcommand, ValueEnum};
use http::Method;
use std::path::PathBuf;
use std::sync::Arc;

/// Command-line interface for routemount
///
/// Inspects route files and dry-runs requests against them.
#[derive(Parser)]
#[command(name = "routemount")]
#[command(about = "routemount CLI", long_about = None)]
pub struct Cli {
    /// Log level (trace/debug/info/warn/error)
    #[arg(long, global = true, env = "ROUTEMOUNT_LOG_LEVEL", default_value = "warn")]
    pub log_level: String,

    /// The subcommand to execute
    #[command(subcommand)]
    pub command: Commands,
}

/// Available CLI commands
#[derive(Subcommand)]
pub enum Commands {
    /// Print every registered before-middleware, route and not-found handler
    Routes {
        /// Route file (YAML, TOML or JSON); falls back to ROUTEMOUNT_ROUTE_FILE
        #[arg(short, long)]
        routes: Option<PathBuf>,
    },
    /// Dispatch a request against a route file and report which handlers ran
    ///
    /// Every `owner@member` reference resolves to a stub that records its name and
    /// parameters, so no application code is needed.
    Resolve {
        /// Route file (YAML, TOML or JSON); falls back to ROUTEMOUNT_ROUTE_FILE
        #[arg(short, long)]
        routes: Option<PathBuf>,

        /// Request method as received on the wire
        #[arg(short, long, default_value = "GET")]
        method: String,

        /// Request URI, query string allowed
        #[arg(short, long)]
        path: String,

        /// Request header as `Name: value` (repeatable)
        #[arg(short = 'H', long = "header")]
        headers: Vec<String>,

        /// Entry script path; its directory is stripped from the URI
        #[arg(long, env = "ROUTEMOUNT_SCRIPT_NAME")]
        script_name: Option<String>,

        /// Output format
        #[arg(long, value_enum, default_value_t = OutputFormat::Text)]
        format: OutputFormat,
    },
}

/// Output format for `resolve`
#[derive(Copy, Clone, Debug, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    Text,
    Json,
}

/// Resolves every reference to a stub that writes `owner@member(params)`
struct EchoResolver;

impl HandlerResolver for EchoResolver {
    fn resolve(&self, owner: &str, member: &str) -> Option<HandlerFn> {
        let label = format!("{owner}@{member}");
        Some(Arc::new(move |params: &Params, out: &mut ResponseBody| {
            let args: Vec<&str> = params.iter().map(|p| p.unwrap_or("null")).collect();
            out.write_str(&format!("{}({})\n", label, args.join(", ")));
            Ok(())
        }))
    }
}

/// Execute the CLI command provided by the user
///
/// # Errors
///
/// Returns an error if the route file cannot be loaded or registered, the request
/// arguments are invalid, or dispatch fails.
pub fn run_cli(cli: Cli) -> anyhow::Result<()> {
    let config = RuntimeConfig::from_env();
    match cli.command {
        Commands::Routes { routes } => {
            let file = load_route_file(routes, &config)?;
            let (router, on_complete) = file.build_router()?;
            router.dump_routes();
            if let Some(handler) = on_complete {
                println!("[on_complete] -> {}", handler.describe());
            }
            Ok(())
        }
        Commands::Resolve {
            routes,
            method,
            path,
            headers,
            script_name,
            format,
        } => {
            let file = load_route_file(routes, &config)?;
            let (router, on_complete) = file.build_router()?;
            let script_name = script_name.or_else(|| config.script_name.clone());
            let request = build_request(&method, &path, &headers, script_name)?;

            let dispatcher = Dispatcher::new(Arc::new(router)).with_resolver(Arc::new(EchoResolver));
            let outcome = dispatcher.dispatch(&request, on_complete.as_ref())?;
            print_outcome(&outcome, format)
        }
    }
}

fn load_route_file(routes: Option<PathBuf>, config: &RuntimeConfig) -> anyhow::Result<RouteFile> {
    let path = routes
        .or_else(|| config.route_file.clone())
        .ok_or_else(|| anyhow!("No route file given (use --routes or ROUTEMOUNT_ROUTE_FILE)"))?;
    Ok(RouteFile::load(&path)?)
}

pub(crate) fn build_request(
    method: &str,
    path: &str,
    headers: &[String],
    script_name: Option<String>,
) -> anyhow::Result<Request> {
    let method = Method::from_bytes(method.trim().to_ascii_uppercase().as_bytes())
        .with_context(|| format!("Invalid method '{method}'"))?;

    let mut request = Request::new(method, path);
    for header in headers {
        let (name, value) = header
            .split_once(':')
            .ok_or_else(|| anyhow!("Invalid header '{header}', expected 'Name: value'"))?;
        request = request.with_header(name.trim(), value.trim());
    }
    if let Some(script_name) = script_name {
        request = request.with_script_name(script_name);
    }
    Ok(request)
}

fn print_outcome(outcome: &DispatchOutcome, format: OutputFormat) -> anyhow::Result<()> {
    let body = String::from_utf8_lossy(&outcome.body);
    match format {
        OutputFormat::Text => {
            println!("status: {:?}", outcome.status);
            println!("effective_method: {}", outcome.effective_method);
            println!("path: {}", outcome.path);
            println!("before_handled: {}", outcome.before_handled);
            println!(
                "matched_pattern: {}",
                outcome.matched_pattern.as_deref().unwrap_or("<none>")
            );
            println!("body_suppressed: {}", outcome.body_suppressed);
            print!("{body}");
        }
        OutputFormat::Json => {
            let value = serde_json::json!({
                "status": format!("{:?}", outcome.status),
                "status_code": outcome.status_code().map(|s| s.as_u16()),
                "effective_method": outcome.effective_method.as_str(),
                "path": outcome.path,
                "before_handled": outcome.before_handled,
                "routes_handled": outcome.routes_handled,
                "matched_pattern": outcome.matched_pattern,
                "params": outcome.params.as_slice(),
                "body_suppressed": outcome.body_suppressed,
                "body": body,
            });
            println!("{}", serde_json::to_string_pretty(&value)?);
        }
    }
    Ok(())
}
