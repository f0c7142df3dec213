// src/cli.rs
//! Command line front end. Fetches through `NhlApi`, writes through `file`,
//! prints to stdout when no output path is given.

use std::io::Write;
use std::path::PathBuf;

use clap::{Args, Parser, Subcommand, ValueEnum};
use color_eyre::eyre::{Result, WrapErr, bail};

use crate::{
    config::consts::{DEFAULT_GAMES_SUBDIR, DEFAULT_ROSTERS_SUBDIR, DEFAULT_SEASONS_SUBDIR},
    config::options::{AppOptions, ExportFormat, ExportOptions, ExportType, FetchOptions, TableKind},
    csv::to_export_string,
    data::{DataSet, NamedTable},
    file::{write_export_per_table, write_export_single},
    game::Game,
    progress::Progress,
    scrape::{self, ScheduleFilter},
    source::NhlApi,
    specs::{live_feed, roster::PositionGroup, teams},
};

#[derive(Parser)]
#[command(name = "nhl_scrape")]
#[command(about = "Flatten NHL live-feed game data into CSV/TSV tables", long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Args, Clone, Debug)]
pub struct OutputArgs {
    /// Output file, or directory with --per-table (stdout when omitted)
    #[arg(short, long)]
    pub out: Option<PathBuf>,

    /// Field separator of the written tables
    #[arg(long, value_enum, default_value_t = FormatArg::Csv)]
    pub format: FormatArg,

    /// Emit a header line
    #[arg(long)]
    pub include_headers: bool,

    /// One file per table in a directory
    #[arg(long)]
    pub per_table: bool,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
pub enum FormatArg {
    Csv,
    Tsv,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Tables of one game
    Game {
        /// Game id (gamePk), e.g. 2019020010
        id: String,

        /// Table to emit (repeatable): events, shots, shot_chart, penalties, turnovers, hits, faceoffs, boxscore
        #[arg(long = "table", value_parser = parse_table)]
        tables: Vec<TableKind>,

        /// Read the live-feed JSON from a file instead of the API
        #[arg(long)]
        from_file: Option<PathBuf>,

        #[command(flatten)]
        output: OutputArgs,
    },

    /// Boxscore rows of every completed game of a team's season
    Season {
        /// Team name, abbreviation or id
        team: String,

        /// Season id, e.g. 20192020 (current season when omitted)
        #[arg(long)]
        season: Option<String>,

        /// Include preseason games
        #[arg(long)]
        include_pre: bool,

        /// Include playoff games
        #[arg(long)]
        include_post: bool,

        #[command(flatten)]
        output: OutputArgs,
    },

    /// A team's roster
    Roster {
        /// Team name, abbreviation or id
        team: String,

        /// Season id (current season when omitted)
        #[arg(long)]
        season: Option<String>,

        /// Only one position group: offense, defense or goalies
        #[arg(long, value_parser = parse_group)]
        position: Option<PositionGroup>,

        #[command(flatten)]
        output: OutputArgs,
    },

    /// List known teams
    Teams {
        #[command(flatten)]
        output: OutputArgs,
    },

    /// Resolve a team name or abbreviation to its id
    TeamId {
        team: String,
    },
}

fn parse_table(s: &str) -> std::result::Result<TableKind, String> {
    TableKind::parse(s).ok_or_else(|| format!("unknown table: {s}"))
}

fn parse_group(s: &str) -> std::result::Result<PositionGroup, String> {
    PositionGroup::parse(s).ok_or_else(|| format!("unknown position group: {s}"))
}

/// Progress lines on stderr.
struct StderrProgress {
    total: usize,
    done: usize,
}

impl Progress for StderrProgress {
    fn begin(&mut self, total: usize) {
        self.total = total;
        eprintln!("Fetching {total} games…");
    }

    fn log(&mut self, msg: &str) {
        eprintln!("{msg}");
    }

    fn item_done(&mut self, id: &str) {
        self.done += 1;
        eprintln!("[{}/{}] {id}", self.done, self.total);
    }

    fn item_failed(&mut self, id: &str, reason: &str) {
        self.done += 1;
        eprintln!("[{}/{}] {id} failed: {reason}", self.done, self.total);
    }

    fn finish(&mut self) {
        eprintln!("Done.");
    }
}

fn export_options(base: &ExportOptions, args: &OutputArgs, subdir: &str, stem: &str) -> ExportOptions {
    let mut export = base.clone();
    export.format = match args.format {
        FormatArg::Csv => ExportFormat::Csv,
        FormatArg::Tsv => ExportFormat::Tsv,
    };
    export.include_headers = args.include_headers;
    export.export_type = if args.per_table { ExportType::PerTable } else { ExportType::SingleFile };
    export.set_default_dir(subdir);
    export.set_file_stem(stem);
    if let Some(out) = &args.out {
        export.set_path(&out.to_string_lossy());
    }
    export
}

/// One table: stdout without `--out`, otherwise a single file.
fn emit_single(args: &OutputArgs, export: &ExportOptions, ds: &DataSet) -> Result<()> {
    if args.out.is_none() {
        let text = to_export_string(ds, export.include_headers, export.delimiter())?;
        std::io::stdout().write_all(text.as_bytes())?;
        return Ok(());
    }
    let path = write_export_single(export, ds)?;
    eprintln!("Wrote {}", path.display());
    Ok(())
}

fn emit_tables(args: &OutputArgs, export: &ExportOptions, prefix: &str, tables: &[NamedTable]) -> Result<()> {
    if args.per_table {
        for path in write_export_per_table(export, prefix, tables)? {
            eprintln!("Wrote {}", path.display());
        }
        return Ok(());
    }
    match tables {
        [one] => emit_single(args, export, &one.data),
        _ => bail!("{} tables requested; pass --per-table or a single --table", tables.len()),
    }
}

pub fn run() -> Result<()> {
    let cli = Cli::parse();
    let opts = AppOptions { fetch: FetchOptions::from_env(), ..AppOptions::default() };
    logf!("nhl_scrape: base {}", opts.fetch.base_url);

    match cli.command {
        Commands::Game { id, tables, from_file, output } => {
            let mut game = match from_file {
                Some(path) => {
                    let text = std::fs::read_to_string(&path)
                        .wrap_err_with(|| format!("reading {}", path.display()))?;
                    Game::from_document(&id, live_feed::parse_doc(&text)?)?
                }
                None => Game::fetch(&NhlApi::new(&opts.fetch)?, &id)?,
            };
            let kinds = match (tables.is_empty(), output.per_table) {
                (false, _) => tables,
                (true, true) => TableKind::ALL.to_vec(),
                (true, false) => vec![TableKind::Events],
            };
            let all = game.tables()?;
            let export = export_options(&opts.export, &output, DEFAULT_GAMES_SUBDIR, &id);
            emit_tables(&output, &export, &id, &all.named(&kinds))
        }

        Commands::Season { team, season, include_pre, include_post, output } => {
            let api = NhlApi::new(&opts.fetch)?;
            let filter = ScheduleFilter { include_preseason: include_pre, include_postseason: include_post };
            let mut progress = StderrProgress { total: 0, done: 0 };
            let log = scrape::collect_season(
                &api,
                &team,
                season.as_deref(),
                filter,
                opts.fetch.workers,
                Some(&mut progress),
            )?;
            for (id, why) in &log.failed {
                eprintln!("skipped {id}: {why}");
            }
            let stem = format!("{}_{}", log.team_id, log.season);
            let export = export_options(&opts.export, &output, DEFAULT_SEASONS_SUBDIR, &stem);
            let table = NamedTable { kind: TableKind::Boxscore, data: DataSet::from_records(&log.rows) };
            emit_tables(&output, &export, &stem, &[table])
        }

        Commands::Roster { team, season, position, output } => {
            let api = NhlApi::new(&opts.fetch)?;
            let roster = scrape::collect_roster(&api, &team, season.as_deref())?;
            let ds = match position {
                Some(g) => DataSet::from_records(roster.group(g)),
                None => DataSet::from_records(&roster.all),
            };
            let stem = teams::resolve_team_id(&team)?;
            let export = export_options(&opts.export, &output, DEFAULT_ROSTERS_SUBDIR, &stem);
            emit_single(&output, &export, &ds)
        }

        Commands::Teams { output } => {
            let export = export_options(&opts.export, &output, "", "teams");
            emit_single(&output, &export, &DataSet::from_records(teams::TEAMS))
        }

        Commands::TeamId { team } => {
            println!("{}", teams::resolve_team_id(&team)?);
            Ok(())
        }
    }
}
