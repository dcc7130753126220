use std::{
    fs::File,
    io::BufReader,
    path::{Path, PathBuf},
};

use anyhow::Context as _;
use clap::{ArgAction, Parser, Subcommand};

#[derive(Parser, Debug)]
#[command(name = "advblend", version)]
struct Cli {
    /// Increase log verbosity (-v info, -vv debug, -vvv trace).
    #[arg(short, long, action = ArgAction::Count, global = true)]
    verbose: u8,

    #[command(subcommand)]
    cmd: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Blend one source color onto one destination color.
    Eval(EvalArgs),
    /// List registered test cases.
    Cases(CasesArgs),
    /// Write reference images for a case (or a JSON array of cases).
    Reference(ReferenceArgs),
    /// Compare rendered images against a case's references.
    Compare(CompareArgs),
}

#[derive(Parser, Debug)]
struct EvalArgs {
    /// Blend op, e.g. `multiply`, `hsl_hue` or `VK_BLEND_OP_PLUS_EXT`.
    #[arg(long)]
    op: advblend::BlendOp,

    /// Overlap mode.
    #[arg(long, default_value = "uncorrelated")]
    overlap: advblend::OverlapMode,

    /// Treat the source color as straight (not premultiplied).
    #[arg(long)]
    nonpremultiplied_src: bool,

    /// Treat the destination color as straight (not premultiplied).
    #[arg(long)]
    nonpremultiplied_dst: bool,

    /// Source color as `r,g,b,a`.
    #[arg(long, value_parser = parse_color, allow_hyphen_values = true)]
    src: advblend::Color4,

    /// Destination color as `r,g,b,a`.
    #[arg(long, value_parser = parse_color, allow_hyphen_values = true)]
    dst: advblend::Color4,

    /// Print JSON instead of text.
    #[arg(long)]
    json: bool,
}

#[derive(Parser, Debug)]
struct CasesArgs {
    /// Only list one group (`ops`, `independent` or `coherent`).
    #[arg(long)]
    group: Option<advblend::PlanGroup>,

    /// Print the number of cases instead of their names.
    #[arg(long)]
    count: bool,

    /// Print full case configurations as JSON lines.
    #[arg(long, conflicts_with = "count")]
    json: bool,
}

#[derive(Parser, Debug)]
struct ReferenceArgs {
    /// Case JSON: one case object or an array of cases.
    #[arg(long)]
    case: PathBuf,

    /// Output JSON path.
    #[arg(long)]
    out: PathBuf,

    /// Device capabilities JSON. Defaults to everything supported.
    #[arg(long)]
    caps: Option<PathBuf>,

    /// Build references for multiple cases on a rayon pool.
    #[arg(long)]
    parallel: bool,

    /// Worker threads for `--parallel`.
    #[arg(long, requires = "parallel")]
    threads: Option<usize>,
}

#[derive(Parser, Debug)]
struct CompareArgs {
    /// Case JSON.
    #[arg(long)]
    case: PathBuf,

    /// Rendered images JSON: an image, an array of images, or a reference file.
    #[arg(long)]
    result: PathBuf,

    /// Compare only this attachment.
    #[arg(long)]
    attachment: Option<usize>,
}

#[derive(serde::Deserialize)]
#[serde(untagged)]
enum OneOrMany<T> {
    Many(Vec<T>),
    One(T),
}

impl<T> OneOrMany<T> {
    fn into_vec(self) -> Vec<T> {
        match self {
            Self::Many(v) => v,
            Self::One(v) => vec![v],
        }
    }
}

#[derive(serde::Deserialize)]
#[serde(untagged)]
enum ResultImages {
    Reference { attachments: Vec<advblend::ReferenceImage> },
    Images(OneOrMany<advblend::ReferenceImage>),
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);
    match cli.cmd {
        Command::Eval(args) => cmd_eval(args),
        Command::Cases(args) => cmd_cases(args),
        Command::Reference(args) => cmd_reference(args),
        Command::Compare(args) => cmd_compare(args),
    }
}

fn init_tracing(verbose: u8) {
    let level = match verbose {
        0 => tracing::Level::WARN,
        1 => tracing::Level::INFO,
        2 => tracing::Level::DEBUG,
        _ => tracing::Level::TRACE,
    };
    tracing_subscriber::fmt()
        .with_max_level(level)
        .with_writer(std::io::stderr)
        .init();
}

fn parse_color(s: &str) -> Result<advblend::Color4, advblend::AdvBlendError> {
    advblend::Color4::parse_csv(s)
}

fn read_json<T: serde::de::DeserializeOwned>(path: &Path, what: &str) -> anyhow::Result<T> {
    let f = File::open(path).with_context(|| format!("open {what} '{}'", path.display()))?;
    let r = BufReader::new(f);
    serde_json::from_reader(r).with_context(|| format!("parse {what} JSON '{}'", path.display()))
}

fn cmd_eval(args: EvalArgs) -> anyhow::Result<()> {
    let param = advblend::BlendParameters {
        premultiplied_src_color: !args.nonpremultiplied_src,
        premultiplied_dst_color: !args.nonpremultiplied_dst,
        overlap: args.overlap,
    };
    let out = advblend::calculate_final_color(&param, args.op, args.src, args.dst);

    if args.json {
        let doc = serde_json::json!({
            "op": args.op,
            "params": param,
            "src": args.src,
            "dst": args.dst,
            "result": out,
        });
        println!("{}", serde_json::to_string(&doc)?);
    } else {
        println!("{out}");
    }
    Ok(())
}

fn cmd_cases(args: CasesArgs) -> anyhow::Result<()> {
    let cases = match args.group {
        Some(group) => advblend::plan_group(group),
        None => advblend::build_plan(),
    };

    if args.count {
        println!("{}", cases.len());
        return Ok(());
    }
    for case in &cases {
        if args.json {
            println!("{}", serde_json::to_string(case)?);
        } else {
            println!("{}", case.path());
        }
    }
    Ok(())
}

fn cmd_reference(args: ReferenceArgs) -> anyhow::Result<()> {
    let input: OneOrMany<advblend::CaseConfig> = read_json(&args.case, "case")?;
    let single = matches!(input, OneOrMany::One(_));
    let configs = input.into_vec();

    let caps = match &args.caps {
        Some(path) => read_json(path, "capabilities")?,
        None => advblend::AdvancedBlendCaps::default(),
    };
    for config in &configs {
        config
            .validate()
            .with_context(|| format!("case '{}'", config.name()))?;
        config
            .check_support(&caps)
            .with_context(|| format!("case '{}'", config.name()))?;
    }

    let threading = advblend::ReferenceThreading {
        parallel: args.parallel,
        threads: args.threads,
    };
    let refs = advblend::build_references(&configs, &threading)?;

    if let Some(parent) = args.out.parent()
        && !parent.as_os_str().is_empty()
    {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("create output dir '{}'", parent.display()))?;
    }
    let json = match refs.as_slice() {
        [one] if single => serde_json::to_string_pretty(one)?,
        all => serde_json::to_string_pretty(all)?,
    };
    std::fs::write(&args.out, json)
        .with_context(|| format!("write reference '{}'", args.out.display()))?;

    eprintln!("wrote {} ({} case(s))", args.out.display(), refs.len());
    Ok(())
}

fn cmd_compare(args: CompareArgs) -> anyhow::Result<()> {
    let config: advblend::CaseConfig = read_json(&args.case, "case")?;
    let results = match read_json::<ResultImages>(&args.result, "result")? {
        ResultImages::Reference { attachments } => attachments,
        ResultImages::Images(images) => images.into_vec(),
    };

    let reports = match args.attachment {
        Some(att) => {
            let reference = advblend::reference_for_case(&config)?;
            let expected = reference.attachments.get(att).with_context(|| {
                format!(
                    "attachment {att} out of range (case has {})",
                    reference.attachments.len()
                )
            })?;
            let result = match results.as_slice() {
                [only] => only,
                many => many.get(att).with_context(|| {
                    format!("result holds no image for attachment {att}")
                })?,
            };
            let threshold = advblend::comparison_threshold(config.mode, config.format);
            vec![(att, advblend::float_threshold_compare(expected, result, threshold)?)]
        }
        None => advblend::compare_case(&config, &results)?
            .into_iter()
            .enumerate()
            .collect(),
    };

    let mut failed = 0usize;
    for (att, report) in &reports {
        if report.passed() {
            println!("attachment {att}: ok (max diff {})", report.max_diff);
        } else {
            failed += 1;
            let (x, y) = report.first_mismatch.unwrap_or_default();
            println!(
                "attachment {att}: {} mismatched pixel(s), first at ({x}, {y}), max diff {}",
                report.mismatched, report.max_diff
            );
        }
    }

    if failed > 0 {
        anyhow::bail!(
            "case '{}': {failed} attachment(s) differ from the reference",
            config.name()
        );
    }
    Ok(())
}
