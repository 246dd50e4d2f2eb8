#![forbid(unsafe_code)]

//! xades CLI: inspect XAdES profiles, their element trees, and check
//! qualifying properties in XML documents.

use clap::{ArgAction, Parser, Subcommand};
use std::path::PathBuf;
use std::process;
use xades_core::{algorithm, Error};
use xades_schema::{elements_for, ElementView, Profile};
use xades_sign::XadesConfig;
use xades_xml::{IdAttr, XmlDocument};

#[derive(Parser)]
#[command(
    name = "xades",
    about = "XAdES profile schema: profiles, element trees, templates and checks",
    version
)]
struct Cli {
    /// Verbosity (-v, -vv, -vvv)
    #[arg(short, long, action = ArgAction::Count, global = true)]
    verbose: u8,

    #[command(subcommand)]
    command: Commands,
}

#[derive(clap::Args)]
struct ConfigArgs {
    /// XAdES namespace URI
    #[arg(long)]
    namespace: Option<String>,

    /// Prefix bound to the XAdES namespace
    #[arg(long)]
    prefix: Option<String>,

    /// Prefix bound to the XML-DSig namespace
    #[arg(long = "signature-prefix")]
    signature_prefix: Option<String>,

    /// Digest algorithm (URI or name such as SHA-256)
    #[arg(long)]
    digest: Option<String>,

    /// Register additional ID attribute names (NAME or {NAMESPACE}NAME)
    #[arg(long = "id-attr")]
    id_attr: Vec<String>,
}

#[derive(Subcommand)]
enum Commands {
    /// List the signature profiles
    Profiles,

    /// List schema elements, optionally for one profile
    Elements {
        /// Profile code or name (e.g. XAdES-BES, X-L, B-LEVEL)
        #[arg(short, long)]
        profile: Option<String>,

        /// Include the elements of the profiles it extends
        #[arg(long, requires = "profile")]
        lineage: bool,
    },

    /// Print the mandatory qualifying-property template of a profile
    Template {
        /// Profile code or name
        #[arg(short, long)]
        profile: String,

        /// Id of the ds:Signature the properties qualify
        #[arg(long = "signature-id")]
        signature_id: String,

        #[command(flatten)]
        config: ConfigArgs,
    },

    /// Check the qualifying properties of a document against a profile
    Check {
        /// Input XML file
        file: PathBuf,

        /// Profile code or name
        #[arg(short, long)]
        profile: String,

        /// Only check below the element with this Id
        #[arg(long)]
        within: Option<String>,

        #[command(flatten)]
        config: ConfigArgs,
    },

    /// List the identifier anchors registered for a document
    Anchors {
        /// Input XML file
        file: PathBuf,

        /// Register additional ID attribute names (NAME or {NAMESPACE}NAME)
        #[arg(long = "id-attr")]
        id_attr: Vec<String>,
    },
}

fn main() {
    let cli = Cli::parse();
    setup_logging(cli.verbose);

    let result = match cli.command {
        Commands::Profiles => cmd_profiles(),
        Commands::Elements { profile, lineage } => cmd_elements(profile, lineage),
        Commands::Template {
            profile,
            signature_id,
            config,
        } => cmd_template(&profile, &signature_id, config),
        Commands::Check {
            file,
            profile,
            within,
            config,
        } => cmd_check(file, &profile, within, config),
        Commands::Anchors { file, id_attr } => cmd_anchors(file, id_attr),
    };

    if let Err(e) = result {
        eprintln!("Error: {e}");
        process::exit(1);
    }
}

fn setup_logging(verbosity: u8) {
    use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

    let level = match verbosity {
        0 => tracing::Level::WARN,
        1 => tracing::Level::INFO,
        2 => tracing::Level::DEBUG,
        _ => tracing::Level::TRACE,
    };

    let filter = tracing_subscriber::EnvFilter::from_default_env().add_directive(level.into());

    let fmt_layer = tracing_subscriber::fmt::layer()
        .with_writer(std::io::stderr)
        .with_target(false);

    tracing_subscriber::registry()
        .with(filter)
        .with(fmt_layer)
        .init();
}

fn cmd_profiles() -> Result<(), Error> {
    for p in Profile::ALL {
        println!(
            "{:<8} {:<11} {:<30} {}",
            p.name(),
            p.code(),
            p.spec_section(),
            p.title()
        );
    }
    Ok(())
}

fn cmd_elements(profile: Option<String>, lineage: bool) -> Result<(), Error> {
    let profile = profile.map(|p| p.parse::<Profile>()).transpose()?;
    let view = match profile {
        Some(p) if lineage => ElementView::for_lineage(p),
        _ => elements_for(profile),
    };
    for s in view.summaries() {
        println!(
            "{:<18} {:<32} {:<5} {}",
            s.identifier,
            s.name,
            s.cardinality.to_string(),
            s.parent.unwrap_or("-")
        );
    }
    Ok(())
}

fn cmd_template(profile: &str, signature_id: &str, args: ConfigArgs) -> Result<(), Error> {
    let config = build_config(args)?;
    let builder = xades_sign::new_signature_builder_by_name(
        profile,
        XmlDocument::new(),
        None,
        config,
    )?;
    println!("{}", builder.template(signature_id)?);
    Ok(())
}

fn cmd_check(
    file: PathBuf,
    profile: &str,
    within: Option<String>,
    args: ConfigArgs,
) -> Result<(), Error> {
    let profile: Profile = profile.parse()?;
    let config = build_config(args)?;
    let mut document = read_document(&file)?;

    let attachment = match within {
        Some(id) => {
            for attr in &config.id_attrs {
                document.add_id_attr(attr.clone());
            }
            document.register_id_anchors()?;
            let node = document
                .find_anchor(&id)
                .ok_or_else(|| Error::MissingElement(format!("no element with Id {id:?}")))?;
            Some(node)
        }
        None => None,
    };

    tracing::info!(file = %file.display(), profile = %profile, "checking");
    let builder = xades_sign::new_signature_builder(profile, document, attachment, config)?;
    let violations = builder.check()?;
    if violations.is_empty() {
        println!("OK");
        return Ok(());
    }
    for v in &violations {
        eprintln!("INVALID: {v}");
    }
    process::exit(1)
}

fn cmd_anchors(file: PathBuf, id_attr: Vec<String>) -> Result<(), Error> {
    let mut document = read_document(&file)?;
    for name in &id_attr {
        document.add_id_attr(name.parse::<IdAttr>()?);
    }
    document.register_id_anchors()?;

    let parsed = document.parse_doc()?;
    for (id, node) in document.anchors() {
        let name = parsed
            .get_node(node)
            .map(|n| n.tag_name().name())
            .unwrap_or("?");
        println!("{id}\t{name}");
    }
    Ok(())
}

// ── Utility functions ────────────────────────────────────────────────

fn build_config(args: ConfigArgs) -> Result<XadesConfig, Error> {
    let mut config = XadesConfig::default();
    if let Some(ns) = args.namespace {
        config = config.with_namespace(&ns);
    }
    if let Some(prefix) = args.prefix {
        config = config.with_prefix(&prefix);
    }
    if let Some(prefix) = args.signature_prefix {
        config = config.with_signature_prefix(&prefix);
    }
    if let Some(digest) = args.digest {
        let uri = algorithm::digest_uri(&digest)
            .ok_or_else(|| Error::UnsupportedAlgorithm(format!("digest: {digest}")))?;
        config = config.with_digest_algorithm(uri);
    }
    for name in &args.id_attr {
        config.add_id_attr(name.parse()?);
    }
    Ok(config)
}

fn read_document(path: &PathBuf) -> Result<XmlDocument, Error> {
    let text = std::fs::read_to_string(path)
        .inspect_err(|e| tracing::error!(path = %path.display(), "cannot read document: {e}"))?;
    XmlDocument::parse(text)
}
