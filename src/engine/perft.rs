// Ficheiro: src/engine/perft.rs
// Descrição: Contagem de nós (perft) para regressão do gerador de lances.

use crate::core::*;
use crate::error::EngineResult;
use crate::moves::legal_moves;
use rayon::prelude::*;

/// Conta as folhas da árvore de lances legais até `depth` meios-lances.
pub fn perft(board: &mut Board, color: Color, depth: u32) -> EngineResult<u64> {
    if depth == 0 {
        return Ok(1);
    }

    let moves = legal_moves(board, color)?;
    if depth == 1 {
        return Ok(moves.len() as u64);
    }

    let mut nodes = 0;
    for mv in moves {
        let mut child = board.scoped_move(mv);
        nodes += perft(&mut child, !color, depth - 1)?;
    }
    Ok(nodes)
}

/// Perft dividido pelos lances da raiz. Cada lance corre numa tarefa rayon
/// com a sua própria cópia do tabuleiro; a ordem dos lances é mantida.
pub fn perft_divide(board: &Board, color: Color, depth: u32) -> EngineResult<Vec<(Move, u64)>> {
    let mut root = *board;
    let moves = legal_moves(&mut root, color)?;
    if depth == 0 {
        return Ok(Vec::new());
    }

    moves
        .par_iter()
        .map(|&mv| {
            let mut child = *board;
            child.apply_move(mv);
            perft(&mut child, !color, depth - 1).map(|nodes| (mv, nodes))
        })
        .collect()
}

/// Perft total usando a divisão paralela.
pub fn perft_parallel(board: &Board, color: Color, depth: u32) -> EngineResult<u64> {
    if depth == 0 {
        return Ok(1);
    }
    Ok(perft_divide(board, color, depth)?.iter().map(|&(_, n)| n).sum())
}
