// Interface UCI (Universal Chess Interface) para o motor Torre

use crossbeam::channel::{unbounded, Sender};
use crossbeam::thread::Scope;
use log::{info, warn};
use std::io::{self, BufRead};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::thread;
use std::time::Duration;
use torre::engine::perft_divide;
use torre::search::{Deadline, Engine, NoopRecorder, SearchConfig, SearchResult, MATE_SCORE};
use torre::*;

enum Event {
    Line(String),
    /// Resultado de uma busca, com a geração do `go` que a lançou.
    SearchDone(u64, EngineResult<SearchResult>),
}

struct UciEngine {
    board: Board,
    to_move: Color,
    threads: usize,
    stop: Option<Arc<AtomicBool>>,
    generation: u64,
}

impl UciEngine {
    fn new() -> Self {
        UciEngine {
            board: Board::new(),
            to_move: Color::White,
            threads: num_cpus::get().max(1),
            stop: None,
            generation: 0,
        }
    }

    /// Trata uma linha de comando; devolve `false` em `quit`.
    fn handle_line<'env>(&mut self, input: &str, scope: &Scope<'env>, events: &Sender<Event>) -> bool {
        let parts: Vec<&str> = input.split_whitespace().collect();
        if parts.is_empty() {
            return true;
        }

        match parts[0] {
            "uci" => self.handle_uci(),
            "isready" => println!("readyok"),
            "ucinewgame" => self.handle_new_game(),
            "setoption" => self.handle_setoption(&parts),
            "position" => self.handle_position(&parts),
            "go" => self.handle_go(&parts, scope, events),
            "stop" => self.handle_stop(),
            "d" => println!("{}\nfen {}", self.board, self.board.to_fen(self.to_move)),
            "quit" => {
                self.handle_stop();
                return false;
            }
            _ => {} // Ignora comandos desconhecidos
        }
        true
    }

    fn handle_uci(&self) {
        println!("id name Torre {}", env!("CARGO_PKG_VERSION"));
        println!("id author Pedro Contessoto");
        println!("option name Threads type spin default {} min 1 max 128", num_cpus::get().max(1));
        println!("uciok");
    }

    fn handle_new_game(&mut self) {
        self.handle_stop();
        self.board = Board::new();
        self.to_move = Color::White;
    }

    fn handle_setoption(&mut self, parts: &[&str]) {
        // setoption name Threads value N
        if let (Some(&"Threads"), Some(value)) = (parts.get(2), parts.get(4)) {
            if let Ok(n) = value.parse::<usize>() {
                self.threads = n.clamp(1, 128);
            }
        }
    }

    fn handle_position(&mut self, parts: &[&str]) {
        if parts.len() < 2 {
            return;
        }

        let mut idx = 1;
        match parts[idx] {
            "startpos" => {
                self.board = Board::new();
                self.to_move = Color::White;
                idx += 1;
            }
            "fen" => {
                idx += 1;
                let mut fen_parts = Vec::new();

                // Coleta partes do FEN até "moves" ou fim
                while idx < parts.len() && parts[idx] != "moves" {
                    fen_parts.push(parts[idx]);
                    idx += 1;
                }

                match Board::from_fen(&fen_parts.join(" ")) {
                    Ok((board, color)) => {
                        self.board = board;
                        self.to_move = color;
                    }
                    Err(e) => {
                        println!("info string {}", e);
                        return;
                    }
                }
            }
            _ => return,
        }

        if idx < parts.len() && parts[idx] == "moves" {
            for text in &parts[idx + 1..] {
                match Move::parse(text) {
                    Ok(mv) => {
                        self.board.apply_move(mv);
                        self.to_move = !self.to_move;
                    }
                    Err(e) => {
                        println!("info string {}", e);
                        break;
                    }
                }
            }
        }
    }

    fn handle_go<'env>(&mut self, parts: &[&str], scope: &Scope<'env>, events: &Sender<Event>) {
        // Para busca anterior se existir
        self.handle_stop();

        let mut config = SearchConfig::default();
        let mut idx = 1;
        while idx < parts.len() {
            let value = parts.get(idx + 1).and_then(|v| v.parse::<u64>().ok());
            match parts[idx] {
                "perft" => {
                    self.run_perft(value.unwrap_or(1) as u32);
                    return;
                }
                "depth" => {
                    if let Some(d) = value {
                        config.max_depth = d.max(1) as u32;
                    }
                    idx += 2;
                }
                "movetime" => {
                    config.move_time = value.map(Duration::from_millis);
                    idx += 2;
                }
                "wtime" | "btime" => {
                    let ours = (parts[idx] == "wtime") == (self.to_move == Color::White);
                    if ours {
                        // Usa 2% do tempo restante
                        config.move_time = value.map(|ms| Duration::from_millis(ms / 50));
                    }
                    idx += 2;
                }
                "infinite" => {
                    config.move_time = None;
                    idx += 1;
                }
                _ => idx += 1,
            }
        }

        // O orçamento de `config.move_time` é aplicado pelo motor; aqui só a flag de `stop`.
        let deadline = Deadline::new(None);
        self.stop = Some(deadline.stop_flag());
        self.generation += 1;

        let generation = self.generation;
        let board = self.board;
        let color = self.to_move;
        let events = events.clone();
        scope.spawn(move |_| {
            let mut engine = Engine::new(config);
            let result = engine.next_move(&board, color, &deadline, &mut NoopRecorder);
            let _ = events.send(Event::SearchDone(generation, result));
        });
    }

    fn handle_stop(&mut self) {
        if let Some(stop) = self.stop.take() {
            stop.store(true, Ordering::Release);
        }
    }

    fn finish_search(&mut self, generation: u64, result: EngineResult<SearchResult>) {
        if self.is_stale(generation) {
            return;
        }

        match result {
            Ok(result) => {
                println!("{}", info_line(&result));
                println!("bestmove {}", result.best_move);
            }
            Err(e) => {
                warn!("search failed: {}", e);
                println!("info string {}", e);
                println!("bestmove 0000");
            }
        }
    }

    /// Uma busca substituída por um `go` mais recente já não responde.
    fn is_stale(&self, generation: u64) -> bool {
        generation != self.generation
    }

    fn run_perft(&self, depth: u32) {
        let pool = match rayon::ThreadPoolBuilder::new().num_threads(self.threads).build() {
            Ok(pool) => pool,
            Err(e) => {
                println!("info string {}", e);
                return;
            }
        };

        match pool.install(|| perft_divide(&self.board, self.to_move, depth)) {
            Ok(divide) => {
                let total: u64 = divide.iter().map(|&(_, n)| n).sum();
                for (mv, nodes) in divide {
                    println!("{}: {}", mv, nodes);
                }
                println!("\nNodes searched: {}", total);
            }
            Err(e) => println!("info string {}", e),
        }
    }
}

/// Linha `info` final. Os valores de mate não dizem a distância, por isso ficam fora.
fn info_line(result: &SearchResult) -> String {
    let score = if result.score.abs() >= MATE_SCORE {
        String::new()
    } else {
        format!(" score cp {}", result.score / 10)
    };
    format!(
        "info depth {}{} nodes {} time {}",
        result.depth,
        score,
        result.nodes,
        result.elapsed.as_millis()
    )
}

fn main() {
    env_logger::init();

    let (events, inbox) = unbounded();

    // Leitura de stdin numa thread própria para que `stop` chegue durante a busca.
    let input = events.clone();
    thread::spawn(move || {
        let stdin = io::stdin();
        for line in stdin.lock().lines() {
            let Ok(line) = line else { break };
            if input.send(Event::Line(line)).is_err() {
                break;
            }
        }
        let _ = input.send(Event::Line("quit".to_string()));
    });

    let result = crossbeam::scope(|scope| {
        let mut engine = UciEngine::new();
        for event in inbox.iter() {
            match event {
                Event::Line(line) => {
                    if !engine.handle_line(line.trim(), scope, &events) {
                        break;
                    }
                }
                Event::SearchDone(generation, result) => engine.finish_search(generation, result),
            }
        }
    });

    if result.is_err() {
        warn!("search thread panicked");
    }
    info!("bye");
}
