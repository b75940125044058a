// ABOUTME: Per-client admission guard with rolling minute/hour/day quotas
// ABOUTME: Rejects conversion requests before any image work once a quota is spent

use crate::constants::rate_limit;
use std::collections::{HashMap, VecDeque};
use std::net::IpAddr;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Mutex, MutexGuard};
use std::time::{Duration, Instant};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Quota {
    pub limit: u32,
    pub period: Duration,
}

impl Quota {
    pub fn new(limit: u32, period: Duration) -> Self {
        Self { limit, period }
    }

    pub fn per_minute(limit: u32) -> Self {
        Self::new(limit, rate_limit::MINUTE)
    }

    pub fn per_hour(limit: u32) -> Self {
        Self::new(limit, rate_limit::HOUR)
    }

    pub fn per_day(limit: u32) -> Self {
        Self::new(limit, rate_limit::DAY)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Admission {
    Allowed,
    Limited { retry_after: Duration },
}

impl Admission {
    pub fn is_allowed(&self) -> bool {
        matches!(self, Admission::Allowed)
    }
}

/// Admitted request times inside one quota's rolling period, oldest first.
#[derive(Debug, Default)]
struct RequestLog(VecDeque<Instant>);

impl RequestLog {
    fn expire(&mut self, quota: &Quota, now: Instant) {
        while let Some(&oldest) = self.0.front() {
            if now.saturating_duration_since(oldest) < quota.period {
                break;
            }
            self.0.pop_front();
        }
    }

    fn is_full(&self, quota: &Quota) -> bool {
        self.0.len() >= quota.limit as usize
    }

    /// Time until the oldest entry leaves the period and frees a slot.
    fn wait(&self, quota: &Quota, now: Instant) -> Duration {
        self.0.front().map_or(quota.period, |&oldest| {
            (oldest + quota.period).saturating_duration_since(now)
        })
    }
}

type ClientLogs = HashMap<IpAddr, Vec<RequestLog>>;

pub struct RateLimiter {
    quotas: Vec<Quota>,
    clients: Mutex<ClientLogs>,
    checks: AtomicU64,
}

impl Default for RateLimiter {
    fn default() -> Self {
        Self::new(vec![
            Quota::per_minute(rate_limit::PER_MINUTE),
            Quota::per_hour(rate_limit::PER_HOUR),
            Quota::per_day(rate_limit::PER_DAY),
        ])
    }
}

impl RateLimiter {
    pub fn new(quotas: Vec<Quota>) -> Self {
        Self {
            quotas,
            clients: Mutex::new(HashMap::new()),
            checks: AtomicU64::new(0),
        }
    }

    pub fn quotas(&self) -> &[Quota] {
        &self.quotas
    }

    pub fn check(&self, client: IpAddr) -> Admission {
        self.check_at(client, Instant::now())
    }

    /// Count one request from `client` at `now` unless a quota is exhausted.
    ///
    /// Rejected requests do not consume quota.
    pub fn check_at(&self, client: IpAddr, now: Instant) -> Admission {
        let mut clients = self.lock();

        if self.checks.fetch_add(1, Ordering::Relaxed) % rate_limit::SWEEP_INTERVAL == 0 {
            self.sweep(&mut clients, now);
        }

        let logs = clients
            .entry(client)
            .or_insert_with(|| self.quotas.iter().map(|_| RequestLog::default()).collect());

        let mut retry_after = None;
        for (entries, quota) in logs.iter_mut().zip(&self.quotas) {
            entries.expire(quota, now);
            if entries.is_full(quota) {
                let wait = entries.wait(quota, now);
                retry_after = Some(retry_after.map_or(wait, |current: Duration| current.max(wait)));
            }
        }

        if let Some(retry_after) = retry_after {
            log::warn!(
                "Rate limit exceeded for {} (retry in {}s)",
                client,
                retry_after.as_secs()
            );
            return Admission::Limited { retry_after };
        }

        for entries in logs.iter_mut() {
            entries.0.push_back(now);
        }
        Admission::Allowed
    }

    /// Number of client addresses currently tracked.
    pub fn tracked_clients(&self) -> usize {
        self.lock().len()
    }

    /// Drop clients with no admitted request left inside any period.
    pub fn sweep_expired(&self, now: Instant) {
        let mut clients = self.lock();
        self.sweep(&mut clients, now);
    }

    fn sweep(&self, clients: &mut ClientLogs, now: Instant) {
        let before = clients.len();
        clients.retain(|_, logs| {
            let mut active = false;
            for (entries, quota) in logs.iter_mut().zip(&self.quotas) {
                entries.expire(quota, now);
                active |= !entries.0.is_empty();
            }
            active
        });
        let removed = before - clients.len();
        if removed > 0 {
            log::debug!("Swept {} idle rate limit entries", removed);
        }
    }

    fn lock(&self) -> MutexGuard<'_, ClientLogs> {
        // Counters stay usable even if a worker panicked while holding the lock
        self.clients.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}
