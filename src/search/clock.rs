//! Oráculo de tempo consultado pela busca.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::{Duration, Instant};

/// Predicado consultado em cada chamada recursiva; `true` manda a busca
/// devolver o melhor lance encontrado até agora.
pub trait TimeOracle {
    fn is_expired(&self) -> bool;
}

impl<F: Fn() -> bool> TimeOracle for F {
    fn is_expired(&self) -> bool {
        self()
    }
}

/// Nunca expira; a busca só pára na profundidade máxima.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoDeadline;

impl TimeOracle for NoDeadline {
    fn is_expired(&self) -> bool {
        false
    }
}

/// Orçamento de tempo opcional mais uma flag de paragem partilhada
/// (o comando `stop` do UCI liga-a a partir de outra thread).
#[derive(Debug, Clone)]
pub struct Deadline {
    start: Instant,
    budget: Option<Duration>,
    stop: Arc<AtomicBool>,
}

impl Deadline {
    pub fn new(budget: Option<Duration>) -> Self {
        Self::with_stop_flag(budget, Arc::new(AtomicBool::new(false)))
    }

    pub fn with_stop_flag(budget: Option<Duration>, stop: Arc<AtomicBool>) -> Self {
        Deadline { start: Instant::now(), budget, stop }
    }

    pub fn stop_flag(&self) -> Arc<AtomicBool> {
        Arc::clone(&self.stop)
    }

    pub fn stop(&self) {
        self.stop.store(true, Ordering::Release);
    }

    pub fn elapsed(&self) -> Duration {
        self.start.elapsed()
    }
}

impl TimeOracle for Deadline {
    fn is_expired(&self) -> bool {
        if self.stop.load(Ordering::Acquire) {
            return true;
        }
        matches!(self.budget, Some(budget) if self.start.elapsed() >= budget)
    }
}
