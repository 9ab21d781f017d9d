use clap::{Parser, Subcommand};
use std::path::{Path, PathBuf};
use std::sync::Arc;
use topic_routes::catalog::{self, Catalog};
use topic_routes::config::{self, RouterConfig};
use topic_routes::loader::{FsModuleSource, LoadError, ModuleRegistry};
use topic_routes::table::RouteTable;
use topic_routes::{check, logging, output, render, resolve};

#[derive(Parser)]
#[command(name = "topic-routes")]
#[command(about = "Route resolver for a static topic reference site")]
#[command(long_about = "\
Route resolver for a static topic reference site

A catalog of topics (category → subcategory → topic) is mapped to content
modules. Each topic route resolves to a module path by category:

  /css/flexbox                                   → css/Flexbox
  /other-languages/php/fundamentals/arrays       → php/fundamentals/Arrays
  /other-languages/laravel/eloquent/query-builder → laravel/eloquent/QueryBuilder
  /unknown/some-topic                            → some-topic (fallback)

Content structure:

  content/
  ├── config.toml                  # Router config (optional)
  ├── catalog.toml                 # Topic catalog
  ├── css/
  │   └── Flexbox.md               # Module for /css/flexbox
  ├── php/fundamentals/
  │   └── Arrays.md                # Module for /other-languages/php/fundamentals/arrays
  └── laravel/eloquent/
      └── QueryBuilder.md          # Module for /other-languages/laravel/eloquent/query-builder

Modules are loaded only when a route is rendered.

Run 'topic-routes gen-config' to generate a documented config.toml.")]
#[command(version)]
struct Cli {
    /// Content directory
    #[arg(long, default_value = "content", global = true)]
    source: PathBuf,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Build the route table and print it
    Routes {
        /// Print the table as JSON
        #[arg(long)]
        json: bool,
    },
    /// Resolve routes to module paths without loading the catalog
    Resolve {
        /// Routes to resolve, e.g. /css/flexbox
        #[arg(required = true)]
        routes: Vec<String>,
    },
    /// Validate config, catalog and module files
    Check,
    /// Load one route's module and print the rendered page
    Render {
        /// Route to render, e.g. /css/flexbox
        route: String,
    },
    /// Print a stock config.toml with all options documented
    GenConfig,
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    match cli.command {
        Command::Routes { json } => {
            let (_, table) = load_site(&cli.source)?;
            if json {
                println!("{}", serde_json::to_string_pretty(table.entries())?);
            } else {
                output::print_route_table(&table);
            }
        }
        Command::Resolve { routes } => {
            logging::init(&RouterConfig::default().log.level);
            for route in &routes {
                let resolution = resolve::resolve(route)?;
                println!("{}", output::format_resolution(route, &resolution));
            }
        }
        Command::Check => {
            println!("==> Checking {}", cli.source.display());
            let (config, table) = load_site(&cli.source)?;
            let report = check::audit(&cli.source, &table, &config.module_extension);
            output::print_audit(&report, &cli.source);
            if !report.missing.is_empty() {
                return Err(format!(
                    "{} route(s) have no module file",
                    report.missing.len()
                )
                .into());
            }
            println!("==> {} routes, content is valid", table.len());
        }
        Command::Render { route } => {
            let (config, table) = load_site(&cli.source)?;
            let nav = render::navigation(&table);
            let source = FsModuleSource::new(&cli.source, config.module_extension.as_str());
            let registry = ModuleRegistry::new(&table, Arc::new(source));
            let page = match futures::executor::block_on(registry.navigate(&route)) {
                Ok(content) => render::render_page(&content, &content_path(&table, &route), &nav),
                Err(e @ (LoadError::UnknownRoute(_) | LoadError::NotFound { .. })) => {
                    tracing::warn!(route = %route, error = %e, "rendering not-found page");
                    render::render_not_found(&route, &nav)
                }
                Err(e) => return Err(e.into()),
            };
            println!("{}", page.into_string());
        }
        Command::GenConfig => {
            print!("{}", config::stock_config_toml());
        }
    }

    Ok(())
}

/// Load config, catalog and route table from a content root.
///
/// Installs logging as soon as the config's default level is known.
fn load_site(root: &Path) -> Result<(RouterConfig, RouteTable), Box<dyn std::error::Error>> {
    let config = config::load_config(root)?;
    logging::init(&config.log.level);
    let catalog: Catalog = catalog::load_catalog(&root.join(&config.catalog))?;
    let table = RouteTable::build(&catalog, config.routes.duplicates)?;
    tracing::debug!(routes = table.len(), "route table built");
    Ok((config, table))
}

/// Table path for a route, so the nav highlights it even with a trailing slash.
fn content_path(table: &RouteTable, route: &str) -> String {
    table
        .get(route)
        .map(|entry| entry.path.clone())
        .unwrap_or_else(|| route.to_string())
}
