use super::clock::{Deadline, TimeOracle};
use super::evaluation;
use super::recorder::TreeRecorder;
use crate::core::attack::is_king_in_check;
use crate::core::*;
use crate::error::EngineResult;
use crate::moves::{is_capture, legal_moves, move_flag};
use log::{debug, info, trace};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use std::time::{Duration, Instant};

/// Valor de mate e limite da janela alfa-beta.
pub const MATE_SCORE: i32 = 999_999_999;

/// Configuração da busca
#[derive(Debug, Clone)]
pub struct SearchConfig {
    /// Profundidade máxima em lances completos (lance próprio + resposta)
    pub max_depth: u32,
    /// Orçamento de tempo por lance, somado ao oráculo recebido em `next_move`
    pub move_time: Option<Duration>,
    /// Semente do gerador aleatório; `None` usa entropia do sistema
    pub seed: Option<u64>,
}

impl Default for SearchConfig {
    fn default() -> Self {
        SearchConfig { max_depth: 64, move_time: None, seed: None }
    }
}

/// Resultado da busca
#[derive(Debug, Clone)]
pub struct SearchResult {
    /// Melhor lance, já com a sua marca; lance nulo se não houver lances
    pub best_move: Move,
    pub score: i32,
    /// Última profundidade que contribuiu para `best_move`
    pub depth: u32,
    pub nodes: u64,
    pub elapsed: Duration,
    /// `false` se `best_move` veio de uma iteração interrompida
    pub completed: bool,
}

/// Motor minimax com poda alfa-beta e aprofundamento iterativo.
pub struct Engine<R: Rng = StdRng> {
    config: SearchConfig,
    rng: R,
    nodes: u64,
}

impl Engine<StdRng> {
    pub fn new(config: SearchConfig) -> Self {
        let rng = match config.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };
        Engine::with_rng(config, rng)
    }
}

impl<R: Rng> Engine<R> {
    pub fn with_rng(config: SearchConfig, rng: R) -> Self {
        Engine { config, rng, nodes: 0 }
    }

    pub fn config(&self) -> &SearchConfig {
        &self.config
    }

    /// Escolhe o lance de `color`. Trabalha numa cópia privada do tabuleiro
    /// e devolve sempre um lance: um lance nulo marcado com mate ou afogamento
    /// quando não há lances legais.
    ///
    /// A busca pára quando `clock` expira ou quando se esgota `config.move_time`.
    pub fn next_move(
        &mut self,
        board: &Board,
        color: Color,
        clock: &dyn TimeOracle,
        recorder: &mut dyn TreeRecorder,
    ) -> EngineResult<SearchResult> {
        let budget = Deadline::new(self.config.move_time);
        let expired = || clock.is_expired() || budget.is_expired();
        let clock: &dyn TimeOracle = &expired;

        let start = Instant::now();
        self.nodes = 0;
        let mut work = *board;

        let mut moves = legal_moves(&mut work, color)?;
        if moves.is_empty() {
            let in_check = is_king_in_check(&work, color)?;
            let flag = if in_check { MoveFlag::Checkmate } else { MoveFlag::Stalemate };
            info!("{:?} has no legal moves: {:?}", color, flag);
            return Ok(SearchResult {
                best_move: Move::null(flag),
                score: if in_check { -MATE_SCORE } else { 0 },
                depth: 0,
                nodes: 0,
                elapsed: start.elapsed(),
                completed: true,
            });
        }

        let mut best: Option<(Move, u32, bool)> = None;
        for depth in 1..=self.config.max_depth.max(1) {
            recorder.begin_iteration(depth);
            let (mv, completed) = self.search_root(&mut work, color, &mut moves, depth, clock, recorder)?;

            if completed {
                best = Some((mv, depth, true));
                // Ordena pelos valores desta iteração; a ordenação estável mantém os empates.
                moves.sort_by(|a, b| b.value.cmp(&a.value));
                info!(
                    "depth {} score {} nodes {} time {}ms best {}",
                    depth,
                    mv.value,
                    self.nodes,
                    start.elapsed().as_millis(),
                    mv
                );
            } else {
                debug!("depth {} interrupted after {} nodes", depth, self.nodes);
                if best.is_none() {
                    best = Some((mv, depth, false));
                }
                break;
            }

            if clock.is_expired() {
                break;
            }
        }

        let (mv, depth, completed) = best.unwrap_or((moves[0], 0, false));
        let flag = move_flag(&mut work, &mv, color)?;
        Ok(SearchResult {
            best_move: mv.with_flag(flag),
            score: mv.value,
            depth,
            nodes: self.nodes,
            elapsed: start.elapsed(),
            completed,
        })
    }

    // Devolve o melhor lance desta iteração e se ela terminou sem interrupção.
    fn search_root(
        &mut self,
        board: &mut Board,
        color: Color,
        moves: &mut [Move],
        depth: u32,
        clock: &dyn TimeOracle,
        recorder: &mut dyn TreeRecorder,
    ) -> EngineResult<(Move, bool)> {
        let depth = depth as i32;
        let beta = MATE_SCORE;

        // Na primeira iteração o candidato inicial é sorteado; depois é a cabeça da lista ordenada.
        let first = if depth == 1 { self.rng.gen_range(0..moves.len()) } else { 0 };
        let value = self.root_child(board, color, moves[first], depth, -MATE_SCORE, beta, clock, recorder)?;
        moves[first] = moves[first].with_value(value);
        let mut alpha = value;
        let mut best = moves[first];

        for i in 0..moves.len() {
            if i == first {
                continue;
            }
            if clock.is_expired() {
                return Ok((best, false));
            }

            let value = self.root_child(board, color, moves[i], depth, alpha, beta, clock, recorder)?;
            moves[i] = moves[i].with_value(value);
            trace!("root {} = {}", moves[i], value);
            if value > alpha {
                alpha = value;
                best = moves[i];
            }
        }

        Ok((best, !clock.is_expired()))
    }

    #[allow(clippy::too_many_arguments)]
    fn root_child(
        &mut self,
        board: &mut Board,
        color: Color,
        mv: Move,
        depth: i32,
        alpha: i32,
        beta: i32,
        clock: &dyn TimeOracle,
        recorder: &mut dyn TreeRecorder,
    ) -> EngineResult<i32> {
        recorder.enter(depth, &mv, color);
        let value = {
            let mut child = board.scoped_move(mv);
            self.min(&mut child, color, depth, alpha, beta, clock, recorder)?
        };
        recorder.leave(value);
        Ok(value)
    }

    /// Nó do lado da raiz. Os filhos são chamados com a mesma profundidade;
    /// só `min` desconta profundidade.
    #[allow(clippy::too_many_arguments)]
    fn max(
        &mut self,
        board: &mut Board,
        root: Color,
        depth: i32,
        mut alpha: i32,
        beta: i32,
        clock: &dyn TimeOracle,
        recorder: &mut dyn TreeRecorder,
    ) -> EngineResult<i32> {
        self.nodes += 1;
        if depth <= 0 || clock.is_expired() {
            return Ok(evaluation::score(board, root));
        }

        let moves = legal_moves(board, root)?;
        if moves.is_empty() {
            return Ok(if is_king_in_check(board, root)? { -MATE_SCORE } else { 0 });
        }

        let mut best = -MATE_SCORE;
        for mv in moves {
            recorder.enter(depth, &mv, root);
            let value = {
                let mut child = board.scoped_move(mv);
                self.min(&mut child, root, depth, alpha, beta, clock, recorder)?
            };
            recorder.leave(value);

            best = best.max(value);
            if best >= beta || clock.is_expired() {
                return Ok(best);
            }
            alpha = alpha.max(best);
        }
        Ok(best)
    }

    /// Nó do adversário. Respostas sem captura descem duas unidades de
    /// profundidade em vez de uma enquanto `depth > 1`.
    #[allow(clippy::too_many_arguments)]
    fn min(
        &mut self,
        board: &mut Board,
        root: Color,
        depth: i32,
        alpha: i32,
        mut beta: i32,
        clock: &dyn TimeOracle,
        recorder: &mut dyn TreeRecorder,
    ) -> EngineResult<i32> {
        self.nodes += 1;
        if depth <= 0 || clock.is_expired() {
            return Ok(evaluation::score(board, root));
        }

        let opponent = !root;
        let moves = legal_moves(board, opponent)?;
        if moves.is_empty() {
            return Ok(if is_king_in_check(board, opponent)? { MATE_SCORE } else { 0 });
        }

        let mut best = MATE_SCORE;
        for mv in moves {
            let next_depth = if depth > 1 && !is_capture(board, &mv) { depth - 2 } else { depth - 1 };
            recorder.enter(next_depth, &mv, opponent);
            let value = {
                let mut child = board.scoped_move(mv);
                self.max(&mut child, root, next_depth, alpha, beta, clock, recorder)?
            };
            recorder.leave(value);

            best = best.min(value);
            if best <= alpha || clock.is_expired() {
                return Ok(best);
            }
            beta = beta.min(best);
        }
        Ok(best)
    }
}
