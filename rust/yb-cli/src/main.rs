//! yb: CLI binary for the Yatzi decision engine.
//!
//! Subcommands:
//! - profiles
//! - keep
//! - choose
//! - sim
//! - compare

use std::env;
use std::path::{Path, PathBuf};
use std::process;
use std::str::FromStr;

use yb_ai::{Difficulty, DifficultyProfile, Engine, EngineConfig};
use yb_core::{Category, Config, Dice, RngChance, ScoreState, NUM_DICE};
use yb_logging::{
    now_ms, CategoryDecisionEventV1, GameEndEventV1, KeepDecisionEventV1, NdjsonError,
    NdjsonWriter, RunManifestV1, SimSummaryEventV1, VersionInfoV1, ENGINE_ID, RULESET_ID,
    RUN_MANIFEST_VERSION,
};
use yb_sim::{GameEvent, GameObserver, SimulationResult};

/// Flags shared by every subcommand.
#[derive(Default)]
struct Common {
    config_path: Option<String>,
    difficulty: Option<String>,
    seed: Option<u64>,
    log: Option<String>,
    json: bool,
}

impl Common {
    /// Consume a shared flag at `args[*i]`. Returns false if the flag is not a shared one.
    fn take(&mut self, args: &[String], i: &mut usize) -> bool {
        match args[*i].as_str() {
            "--config" => {
                self.config_path = Some(value(args, *i, "--config").to_string());
                *i += 2;
            }
            "--difficulty" | "-d" => {
                self.difficulty = Some(value(args, *i, "--difficulty").to_string());
                *i += 2;
            }
            "--seed" => {
                self.seed = Some(parse_num(args, *i, "--seed"));
                *i += 2;
            }
            "--log" => {
                self.log = Some(value(args, *i, "--log").to_string());
                *i += 2;
            }
            "--json" => {
                self.json = true;
                *i += 1;
            }
            _ => return false,
        }
        true
    }

    fn config(&self) -> Config {
        match &self.config_path {
            Some(p) => Config::load(p).unwrap_or_else(|e| {
                eprintln!("Failed to load config {p}: {e}");
                process::exit(1);
            }),
            None => Config::default(),
        }
    }

    fn profile(&self, cfg: &Config) -> DifficultyProfile {
        let key = self.difficulty.as_deref().unwrap_or(cfg.difficulty.as_str());
        DifficultyProfile::from_config(cfg, key)
    }

    fn open_log(&self, cfg: &Config) -> Option<NdjsonWriter> {
        let path = self.log.clone().or_else(|| cfg.logging.decisions_path.clone())?;
        match NdjsonWriter::open_append_with_flush(&path, cfg.logging.flush_every_lines) {
            Ok(w) => Some(w),
            Err(e) => {
                eprintln!("Failed to open log {path}: {e}");
                process::exit(1);
            }
        }
    }
}

fn value<'a>(args: &'a [String], i: usize, flag: &str) -> &'a str {
    match args.get(i + 1) {
        Some(v) => v.as_str(),
        None => {
            eprintln!("Missing value for {flag}");
            process::exit(1);
        }
    }
}

fn parse_num<T: FromStr>(args: &[String], i: usize, flag: &str) -> T {
    let raw = value(args, i, flag);
    raw.parse().unwrap_or_else(|_| {
        eprintln!("Invalid {flag} value: {raw}");
        process::exit(1);
    })
}

fn unknown_option(cmd: &str, other: &str) -> ! {
    eprintln!("Unknown option for `yb {cmd}`: {other}");
    eprintln!("Run `yb {cmd} --help` for usage.");
    process::exit(1);
}

fn engine_from(cfg: &Config, parallel: bool) -> Engine {
    let mut ec = EngineConfig::from(&cfg.engine);
    ec.parallel |= parallel;
    Engine::new(ec).unwrap_or_else(|e| {
        eprintln!("{e}");
        process::exit(1);
    })
}

/// `"1,2,3,4,5"` or `"12345"`.
fn parse_dice(s: &str) -> Result<Dice, String> {
    let faces: Vec<u8> = if s.contains(',') {
        s.split(',')
            .map(|t| t.trim().parse::<u8>().map_err(|_| format!("bad die: {t:?}")))
            .collect::<Result<_, _>>()?
    } else {
        s.chars()
            .map(|c| {
                c.to_digit(10)
                    .map(|d| d as u8)
                    .ok_or_else(|| format!("bad die: {c:?}"))
            })
            .collect::<Result<_, _>>()?
    };
    if faces.len() != NUM_DICE {
        return Err(format!("expected {NUM_DICE} dice, got {}", faces.len()));
    }
    if let Some(bad) = faces.iter().find(|d| !(1..=6).contains(*d)) {
        return Err(format!("die out of range 1..=6: {bad}"));
    }
    let mut dice = [0u8; NUM_DICE];
    dice.copy_from_slice(&faces);
    Ok(dice)
}

/// `"ones=3,yatzi=0"`.
fn parse_scored(s: &str) -> Result<ScoreState, String> {
    let mut state = ScoreState::new();
    for entry in s.split(',').map(str::trim).filter(|e| !e.is_empty()) {
        let (name, score) = entry
            .split_once('=')
            .ok_or_else(|| format!("expected category=score, got {entry:?}"))?;
        let cat = Category::from_str(name.trim()).map_err(|e| e.to_string())?;
        let raw: i32 = score
            .trim()
            .parse()
            .map_err(|_| format!("bad score for {cat}: {score:?}"))?;
        state.record(cat, raw).map_err(|e| e.to_string())?;
    }
    Ok(state)
}

fn run_id(prefix: &str) -> String {
    format!("{prefix}-{}", now_ms())
}

fn print_json<T: serde::Serialize>(v: &T) {
    match serde_json::to_string_pretty(v) {
        Ok(s) => println!("{s}"),
        Err(e) => {
            eprintln!("Failed to encode JSON: {e}");
            process::exit(1);
        }
    }
}

fn log_or_exit<T: serde::Serialize>(w: &mut NdjsonWriter, ev: &T) {
    if let Err(e) = w.write_event(ev).and_then(|_| w.flush()) {
        eprintln!("Failed to write log: {e}");
        process::exit(1);
    }
}

fn cmd_profiles(args: &[String]) {
    let mut common = Common::default();
    let mut i = 0usize;
    while i < args.len() {
        if common.take(args, &mut i) {
            continue;
        }
        match args[i].as_str() {
            "--help" | "-h" => {
                println!(
                    r#"yb profiles

USAGE:
    yb profiles [--config PATH] [--json]

Prints the difficulty profiles with any config overrides applied.
"#
                );
                return;
            }
            other => unknown_option("profiles", other),
        }
    }

    let cfg = common.config();
    let profiles: Vec<DifficultyProfile> = Difficulty::ALL
        .iter()
        .map(|d| DifficultyProfile::from_config(&cfg, d.key()))
        .collect();

    if common.json {
        print_json(&profiles);
        return;
    }

    println!(
        "{:<8} {:>6} {:>6} {:>6} {:>6} {:>6} {:>7} {:>6} {:>6}",
        "name", "sims", "bonus", "rarity", "zero", "risk", "mistake", "hold", "chase"
    );
    for p in &profiles {
        println!(
            "{:<8} {:>6} {:>6.2} {:>6.2} {:>6.2} {:>6.2} {:>7.3} {:>6.1} {:>6}",
            p.difficulty.key(),
            p.simulations,
            p.bonus_weight,
            p.rarity_weight,
            p.zero_penalty,
            p.risk_bias,
            p.mistake_chance,
            p.hold_greed_threshold,
            p.chase_yahtzee
        );
    }
}

fn cmd_keep(args: &[String]) {
    let mut common = Common::default();
    let mut dice: Option<Dice> = None;
    let mut roll_index: u8 = 0;
    let mut state = ScoreState::new();

    let mut i = 0usize;
    while i < args.len() {
        if common.take(args, &mut i) {
            continue;
        }
        match args[i].as_str() {
            "--help" | "-h" => {
                println!(
                    r#"yb keep

USAGE:
    yb keep --dice 1,2,3,4,5 [--roll 0|1|2] [--scored ones=3,...] [OPTIONS]

OPTIONS:
    --dice D          Current hand (required)
    --roll N          Rolls already taken minus one (default: 0)
    --scored LIST     Categories already scored, as name=score pairs
    --difficulty K    easy | medium | hard (default: config, then medium)
    --seed S          RNG seed (default: config simulation.seed)
    --config PATH     YAML config
    --log PATH        Append the decision as NDJSON
    --json            Print the full decision as JSON
"#
                );
                return;
            }
            "--dice" => {
                dice = Some(parse_dice(value(args, i, "--dice")).unwrap_or_else(|e| {
                    eprintln!("Invalid --dice: {e}");
                    process::exit(1);
                }));
                i += 2;
            }
            "--roll" => {
                roll_index = parse_num(args, i, "--roll");
                if roll_index > 2 {
                    eprintln!("--roll must be 0, 1 or 2");
                    process::exit(1);
                }
                i += 2;
            }
            "--scored" => {
                state = parse_scored(value(args, i, "--scored")).unwrap_or_else(|e| {
                    eprintln!("Invalid --scored: {e}");
                    process::exit(1);
                });
                i += 2;
            }
            other => unknown_option("keep", other),
        }
    }

    let Some(dice) = dice else {
        eprintln!("Missing required --dice");
        process::exit(1);
    };

    let cfg = common.config();
    let profile = common.profile(&cfg);
    let engine = engine_from(&cfg, false);
    let mut chance = RngChance::seeded(common.seed.unwrap_or(cfg.simulation.seed));

    let d = engine
        .decide_keep_detailed(&dice, &state, roll_index, &profile, &mut chance)
        .unwrap_or_else(|e| {
            eprintln!("Keep decision failed: {e}");
            process::exit(1);
        });

    if let Some(mut w) = common.open_log(&cfg) {
        log_or_exit(
            &mut w,
            &KeepDecisionEventV1 {
                event: "keep_decision",
                ts_ms: now_ms(),
                v: VersionInfoV1::current(),
                run_id: run_id("keep"),
                game_id: 0,
                turn: state.used().count() as u8,
                roll_index,
                difficulty: profile.difficulty.key(),
                dice,
                keep: d.mask.as_array(),
                outcome: d.outcome.as_str(),
                candidates: d.stats.candidates as u64,
                rollouts: d.stats.rollouts,
                current_best: d.stats.current_best,
                best_ev: d.stats.best_ev,
            },
        );
    }

    if common.json {
        print_json(&d);
        return;
    }
    let kept: Vec<String> = (0..NUM_DICE)
        .filter(|&k| d.mask.keeps(k))
        .map(|k| dice[k].to_string())
        .collect();
    println!("keep: {} [{}] ({})", d.mask, kept.join(","), d.outcome.as_str());
}

fn cmd_choose(args: &[String]) {
    let mut common = Common::default();
    let mut dice: Option<Dice> = None;
    let mut state = ScoreState::new();

    let mut i = 0usize;
    while i < args.len() {
        if common.take(args, &mut i) {
            continue;
        }
        match args[i].as_str() {
            "--help" | "-h" => {
                println!(
                    r#"yb choose

USAGE:
    yb choose --dice 1,2,3,4,5 [--scored ones=3,...] [OPTIONS]

OPTIONS:
    --dice D          Final hand (required)
    --scored LIST     Categories already scored, as name=score pairs
    --difficulty K    easy | medium | hard (default: config, then medium)
    --seed S          RNG seed (default: config simulation.seed)
    --config PATH     YAML config
    --log PATH        Append the decision as NDJSON
    --json            Print the choice as JSON
"#
                );
                return;
            }
            "--dice" => {
                dice = Some(parse_dice(value(args, i, "--dice")).unwrap_or_else(|e| {
                    eprintln!("Invalid --dice: {e}");
                    process::exit(1);
                }));
                i += 2;
            }
            "--scored" => {
                state = parse_scored(value(args, i, "--scored")).unwrap_or_else(|e| {
                    eprintln!("Invalid --scored: {e}");
                    process::exit(1);
                });
                i += 2;
            }
            other => unknown_option("choose", other),
        }
    }

    let Some(dice) = dice else {
        eprintln!("Missing required --dice");
        process::exit(1);
    };

    let cfg = common.config();
    let profile = common.profile(&cfg);
    let engine = engine_from(&cfg, false);
    let mut chance = RngChance::seeded(common.seed.unwrap_or(cfg.simulation.seed));

    let c = engine
        .choose_category(&dice, &state, &profile, &mut chance)
        .unwrap_or_else(|e| {
            eprintln!("Category choice failed: {e}");
            process::exit(1);
        });

    if let Some(mut w) = common.open_log(&cfg) {
        let mut after = state;
        if let Err(e) = after.record(c.category, c.score) {
            eprintln!("Failed to record {}: {e}", c.category.name());
            process::exit(1);
        }
        let total_after = after.total();
        log_or_exit(
            &mut w,
            &CategoryDecisionEventV1 {
                event: "category_decision",
                ts_ms: now_ms(),
                v: VersionInfoV1::current(),
                run_id: run_id("choose"),
                game_id: 0,
                turn: state.used().count() as u8,
                difficulty: profile.difficulty.key(),
                dice,
                category: c.category.name(),
                score: c.score,
                fallback: c.fallback,
                total_after,
            },
        );
    }

    if common.json {
        print_json(&c);
        return;
    }
    println!("{} {}", c.category, c.score);
}

/// Streams game events to an NDJSON log. The first write error is kept and reported.
struct NdjsonObserver {
    w: NdjsonWriter,
    run_id: String,
    difficulty: &'static str,
    base_seed: u64,
    err: Option<NdjsonError>,
}

impl NdjsonObserver {
    fn write<T: serde::Serialize>(&mut self, ev: &T) {
        if self.err.is_none() {
            if let Err(e) = self.w.write_event(ev) {
                self.err = Some(e);
            }
        }
    }

    fn finish(mut self) -> Result<NdjsonWriter, NdjsonError> {
        if let Some(e) = self.err.take() {
            return Err(e);
        }
        self.w.flush()?;
        Ok(self.w)
    }
}

impl GameObserver for NdjsonObserver {
    fn on_event(&mut self, ev: &GameEvent<'_>) {
        let ts_ms = now_ms();
        match ev {
            GameEvent::Keep {
                game_id,
                turn,
                roll_index,
                dice,
                decision,
            } => {
                let e = KeepDecisionEventV1 {
                    event: "keep_decision",
                    ts_ms,
                    v: VersionInfoV1::current(),
                    run_id: self.run_id.clone(),
                    game_id: *game_id,
                    turn: *turn,
                    roll_index: *roll_index,
                    difficulty: self.difficulty,
                    dice: *dice,
                    keep: decision.mask.as_array(),
                    outcome: decision.outcome.as_str(),
                    candidates: decision.stats.candidates as u64,
                    rollouts: decision.stats.rollouts,
                    current_best: decision.stats.current_best,
                    best_ev: decision.stats.best_ev,
                };
                self.write(&e);
            }
            GameEvent::Score {
                game_id,
                turn,
                dice,
                choice,
                sheet,
            } => {
                let e = CategoryDecisionEventV1 {
                    event: "category_decision",
                    ts_ms,
                    v: VersionInfoV1::current(),
                    run_id: self.run_id.clone(),
                    game_id: *game_id,
                    turn: *turn,
                    difficulty: self.difficulty,
                    dice: *dice,
                    category: choice.category.name(),
                    score: choice.score,
                    fallback: choice.fallback,
                    total_after: sheet.total(),
                };
                self.write(&e);
            }
            GameEvent::End(r) => {
                let e = GameEndEventV1 {
                    event: "game_end",
                    ts_ms,
                    v: VersionInfoV1::current(),
                    run_id: self.run_id.clone(),
                    game_id: r.game_id,
                    seed: yb_sim::game_seed(self.base_seed, r.game_id),
                    difficulty: r.profile.difficulty.key(),
                    total: r.total,
                    upper_sum: r.upper_sum,
                    upper_bonus: r.upper_bonus,
                    yatzi: r.scored_yatzi(),
                };
                self.write(&e);
            }
        }
    }
}

fn summary_event(run_id: &str, r: &SimulationResult) -> Option<SimSummaryEventV1> {
    let s = r.summary()?;
    Some(SimSummaryEventV1 {
        event: "sim_summary",
        ts_ms: now_ms(),
        v: VersionInfoV1::current(),
        run_id: run_id.to_string(),
        difficulty: r.profile.difficulty.key(),
        games: r.games.len() as u64,
        seed: r.seed,
        mean: s.mean,
        median: s.median,
        std: s.std_dev,
        min: s.min,
        max: s.max,
        bonus_rate: r.bonus_rate(),
        yatzi_rate: r.yatzi_rate(),
    })
}

fn write_manifest_or_exit(dir: &Path, m: &RunManifestV1) {
    if let Err(e) = yb_logging::write_manifest_atomic(dir.join("run.json"), m) {
        eprintln!("Failed to write run manifest: {e}");
        process::exit(1);
    }
}

fn cmd_sim(args: &[String]) {
    let mut common = Common::default();
    let mut games: Option<u32> = None;
    let mut no_hist = false;
    let mut parallel = false;
    let mut out: Option<PathBuf> = None;

    let mut i = 0usize;
    while i < args.len() {
        if common.take(args, &mut i) {
            continue;
        }
        match args[i].as_str() {
            "--help" | "-h" => {
                println!(
                    r#"yb sim

USAGE:
    yb sim [--difficulty K] [--games N] [--seed S] [--no-hist] [OPTIONS]

OPTIONS:
    --games N         Number of games (default: config simulation.games)
    --difficulty K    easy | medium | hard (default: config, then medium)
    --seed S          Base seed (default: config simulation.seed)
    --parallel        Also evaluate keep candidates in parallel
    --out DIR         Write a run manifest (run.json) into DIR
    --config PATH     YAML config
    --log PATH        Append every decision as NDJSON (games then run sequentially)
    --no-hist         Skip printing histogram
    --json            Print the summary as JSON
"#
                );
                return;
            }
            "--games" => {
                games = Some(parse_num(args, i, "--games"));
                i += 2;
            }
            "--no-hist" => {
                no_hist = true;
                i += 1;
            }
            "--parallel" => {
                parallel = true;
                i += 1;
            }
            "--out" => {
                out = Some(PathBuf::from(value(args, i, "--out")));
                i += 2;
            }
            other => unknown_option("sim", other),
        }
    }

    let cfg = common.config();
    let profile = common.profile(&cfg);
    let engine = engine_from(&cfg, parallel);
    let games = games.unwrap_or(cfg.simulation.games).max(1);
    let seed = common.seed.unwrap_or(cfg.simulation.seed);
    let rid = run_id("sim");

    let mut manifest = RunManifestV1 {
        run_manifest_version: RUN_MANIFEST_VERSION,
        run_id: rid.clone(),
        created_ts_ms: now_ms(),
        ruleset_id: RULESET_ID.to_string(),
        engine_id: ENGINE_ID.to_string(),
        git_hash: yb_logging::try_git_hash(),
        config_hash: common
            .config_path
            .as_ref()
            .and_then(|p| std::fs::read(p).ok())
            .map(|b| yb_logging::hash_config_bytes(&b)),
        difficulties: vec![profile.difficulty.key().to_string()],
        games_per_difficulty: games as u64,
        seed,
        parallel: engine.config().parallel,
        decisions_log: common.log.clone().or_else(|| cfg.logging.decisions_path.clone()),
        games_completed: 0,
        finished_ts_ms: None,
    };
    if let Some(dir) = &out {
        if let Err(e) = std::fs::create_dir_all(dir) {
            eprintln!("Failed to create {}: {e}", dir.display());
            process::exit(1);
        }
        write_manifest_or_exit(dir, &manifest);
    }

    println!(
        "Running {games} games at {} (seed {seed})...",
        profile.difficulty
    );
    let result = match common.open_log(&cfg) {
        Some(w) => {
            let mut obs = NdjsonObserver {
                w,
                run_id: rid.clone(),
                difficulty: profile.difficulty.key(),
                base_seed: seed,
                err: None,
            };
            let r = yb_sim::simulate_observed(&engine, &profile, games, seed, &mut obs);
            let mut w = obs.finish().unwrap_or_else(|e| {
                eprintln!("Failed to write log: {e}");
                process::exit(1);
            });
            if let Ok(r) = &r {
                if let Some(ev) = summary_event(&rid, r) {
                    log_or_exit(&mut w, &ev);
                }
            }
            r
        }
        None => yb_sim::simulate(&engine, &profile, games, seed),
    };
    let result = result.unwrap_or_else(|e| {
        eprintln!("Simulation failed: {e}");
        process::exit(1);
    });

    if let Some(dir) = &out {
        manifest.games_completed = result.games.len() as u64;
        manifest.finished_ts_ms = Some(now_ms());
        write_manifest_or_exit(dir, &manifest);
    }

    let Some(s) = result.summary() else {
        return;
    };
    if common.json {
        print_json(&summary_event(&rid, &result));
        return;
    }

    println!();
    println!("Evaluation:");
    println!("  - Difficulty: {}", profile.difficulty);
    println!("  - Games: {}", s.n);
    println!(
        "  - Score: mean={:.2}, median={}, std={:.2}, min={}, max={}",
        s.mean, s.median, s.std_dev, s.min, s.max
    );
    println!("  - Upper bonus rate: {:.1}%", result.bonus_rate() * 100.0);
    println!("  - Yatzi rate: {:.1}%", result.yatzi_rate() * 100.0);

    if !no_hist {
        yb_sim::print_histogram(&result.scores());
    }
}

fn cmd_compare(args: &[String]) {
    let mut common = Common::default();
    let mut games: Option<u32> = None;

    let mut i = 0usize;
    while i < args.len() {
        if common.take(args, &mut i) {
            continue;
        }
        match args[i].as_str() {
            "--help" | "-h" => {
                println!(
                    r#"yb compare

USAGE:
    yb compare [--games N] [--seed S] [--config PATH] [--json]

Plays the same seeded games at every difficulty and prints one row each.
"#
                );
                return;
            }
            "--games" => {
                games = Some(parse_num(args, i, "--games"));
                i += 2;
            }
            other => unknown_option("compare", other),
        }
    }

    let cfg = common.config();
    let engine = engine_from(&cfg, false);
    let games = games.unwrap_or(cfg.simulation.games).max(1);
    let seed = common.seed.unwrap_or(cfg.simulation.seed);
    let profiles: Vec<DifficultyProfile> = Difficulty::ALL
        .iter()
        .map(|d| DifficultyProfile::from_config(&cfg, d.key()))
        .collect();

    let results = yb_sim::compare_difficulties(&engine, &profiles, games, seed)
        .unwrap_or_else(|e| {
            eprintln!("Comparison failed: {e}");
            process::exit(1);
        });

    let rid = run_id("compare");
    let rows: Vec<SimSummaryEventV1> = results
        .iter()
        .filter_map(|r| summary_event(&rid, r))
        .collect();

    if let Some(mut w) = common.open_log(&cfg) {
        for row in &rows {
            log_or_exit(&mut w, row);
        }
    }

    if common.json {
        print_json(&rows);
        return;
    }

    println!(
        "{:<8} {:>6} {:>8} {:>6} {:>7} {:>5} {:>5} {:>7} {:>7}",
        "name", "games", "mean", "median", "std", "min", "max", "bonus%", "yatzi%"
    );
    for r in &rows {
        println!(
            "{:<8} {:>6} {:>8.2} {:>6} {:>7.2} {:>5} {:>5} {:>7.1} {:>7.1}",
            r.difficulty,
            r.games,
            r.mean,
            r.median,
            r.std,
            r.min,
            r.max,
            r.bonus_rate * 100.0,
            r.yatzi_rate * 100.0
        );
    }
}

fn print_help() {
    eprintln!(
        r#"yb - Yatzi decision engine CLI

USAGE:
    yb <COMMAND> [OPTIONS]

COMMANDS:
    profiles    Show difficulty profiles (with config overrides)
    keep        Decide which dice to keep for a hand
    choose      Choose the category to score a final hand in
    sim         Simulate full games at one difficulty
    compare     Simulate the same games at every difficulty

OPTIONS:
    -h, --help          Print this help message
    -V, --version       Print version

Run `yb <COMMAND> --help` for command options.
"#
    );
}

fn print_version() {
    println!("yb {}", env!("CARGO_PKG_VERSION"));
}

fn main() {
    let args: Vec<String> = env::args().collect();

    if args.len() < 2 {
        print_help();
        process::exit(0);
    }

    match args[1].as_str() {
        "-h" | "--help" | "help" => print_help(),
        "-V" | "--version" => print_version(),
        "profiles" => cmd_profiles(&args[2..]),
        "keep" => cmd_keep(&args[2..]),
        "choose" => cmd_choose(&args[2..]),
        "sim" => cmd_sim(&args[2..]),
        "compare" => cmd_compare(&args[2..]),
        cmd => {
            eprintln!("Unknown command: {}", cmd);
            eprintln!("Run `yb --help` for usage.");
            process::exit(1);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_dice_in_both_forms() {
        assert_eq!(parse_dice("1,2,3,4,5"), Ok([1, 2, 3, 4, 5]));
        assert_eq!(parse_dice("66611"), Ok([6, 6, 6, 1, 1]));
        assert!(parse_dice("1,2,3").is_err());
        assert!(parse_dice("1,2,3,4,7").is_err());
        assert!(parse_dice("1234x").is_err());
    }

    #[test]
    fn parses_scored_categories() {
        let s = parse_scored("ones=3, sixes=18,yatzi=0").unwrap();
        assert_eq!(s.score(Category::Ones), Some(3));
        assert_eq!(s.score(Category::Sixes), Some(18));
        assert_eq!(s.score(Category::Yatzi), Some(0));
        assert_eq!(s.open_count(), 10);
        assert!(parse_scored("").unwrap().used().next().is_none());
        assert!(parse_scored("ones=3,ones=2").is_err());
        assert!(parse_scored("bogus=3").is_err());
        assert!(parse_scored("ones").is_err());
    }
}
