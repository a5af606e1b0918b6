// Torre - linha de comandos: busca, perft e validação de lances
use anyhow::Result;
use clap::{ArgAction, Parser, Subcommand};
use log::LevelFilter;
use std::time::{Duration, Instant};
use torre::engine::{perft, perft_divide};
use torre::search::{Engine, NoDeadline, NoopRecorder, SearchConfig, TreeCollector};
use torre::validation::is_legal;
use torre::*;

#[derive(Parser)]
#[command(name = "torre", version, about = "Minimax chess engine with alpha-beta pruning")]
struct Cli {
    /// Nível de log: -v info, -vv debug, -vvv trace
    #[arg(short, long, action = ArgAction::Count, global = true)]
    verbose: u8,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Procura o melhor lance para o lado a jogar
    Best {
        #[arg(long, default_value = START_FEN)]
        fen: String,
        /// Profundidade máxima em lances completos
        #[arg(long, default_value_t = 3)]
        depth: u32,
        #[arg(long)]
        movetime_ms: Option<u64>,
        #[arg(long)]
        seed: Option<u64>,
        /// Imprime a árvore da última iteração até este número de meios-lances
        #[arg(long)]
        tree: Option<usize>,
    },
    /// Conta as folhas da árvore de lances legais
    Perft {
        #[arg(long, default_value = START_FEN)]
        fen: String,
        #[arg(long, default_value_t = 4)]
        depth: u32,
    },
    /// Perft dividido pelos lances da raiz (em paralelo)
    Divide {
        #[arg(long, default_value = START_FEN)]
        fen: String,
        #[arg(long, default_value_t = 3)]
        depth: u32,
    },
    /// Valida um lance em notação longa (e2e4; 0000 para o lance nulo)
    Validate {
        #[arg(long, default_value = START_FEN)]
        fen: String,
        #[arg(value_name = "MOVE")]
        mv: String,
        /// none, check, checkmate ou stalemate
        #[arg(long, default_value = "none")]
        flag: MoveFlag,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    let level = match cli.verbose {
        0 => LevelFilter::Warn,
        1 => LevelFilter::Info,
        2 => LevelFilter::Debug,
        _ => LevelFilter::Trace,
    };
    env_logger::Builder::new().filter_level(level).parse_default_env().init();

    match cli.command {
        Command::Best { fen, depth, movetime_ms, seed, tree } => {
            let (board, color) = Board::from_fen(&fen)?;
            let config = SearchConfig { max_depth: depth, move_time: movetime_ms.map(Duration::from_millis), seed };
            let mut engine = Engine::new(config);

            println!("{}\n", board);
            let result = match tree {
                Some(plies) => {
                    let mut collector = TreeCollector::new(plies);
                    let result = engine.next_move(&board, color, &NoDeadline, &mut collector)?;
                    print!("{}", collector.render());
                    result
                }
                None => engine.next_move(&board, color, &NoDeadline, &mut NoopRecorder)?,
            };

            println!("bestmove {} ({:?})", result.best_move, result.best_move.flag);
            println!(
                "score {} depth {}{} nodes {} time {}ms",
                result.score,
                result.depth,
                if result.completed { "" } else { " (partial)" },
                result.nodes,
                result.elapsed.as_millis()
            );
        }
        Command::Perft { fen, depth } => {
            let (mut board, color) = Board::from_fen(&fen)?;
            let start = Instant::now();
            let nodes = perft(&mut board, color, depth)?;
            let elapsed = start.elapsed();
            println!("perft({}) = {}", depth, nodes);
            println!("time {:.2}ms nps {:.0}", elapsed.as_secs_f64() * 1000.0, nodes as f64 / elapsed.as_secs_f64().max(1e-9));
        }
        Command::Divide { fen, depth } => {
            let (board, color) = Board::from_fen(&fen)?;
            let divide = perft_divide(&board, color, depth)?;
            let mut total: u64 = 0;
            for (mv, nodes) in &divide {
                println!("{}: {}", mv, nodes);
                total += *nodes;
            }
            println!("\nmoves {} nodes {}", divide.len(), total);
        }
        Command::Validate { fen, mv, flag } => {
            let (board, color) = Board::from_fen(&fen)?;
            let mv = Move::parse(&mv)?.with_flag(flag);
            let legal = is_legal(&board, &mv, color)?;
            println!("{} {:?}: {}", mv, flag, if legal { "legal" } else { "illegal" });
        }
    }

    Ok(())
}
