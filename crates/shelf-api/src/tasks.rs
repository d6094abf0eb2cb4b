//! 백그라운드 데모 태스크.
//!
//! `POST /tasks` 요청마다 두 개의 작업이 순서대로 실행됩니다:
//!
//! 1. blocking thread pool에서 동기 sleep (기본 2초)
//! 2. 비동기 sleep (기본 3초)
//!
//! 작업은 fire-and-forget이며 진행 상황은 [`TaskStats`] 카운터로만 관찰됩니다.

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use std::time::Duration;

use serde::{Deserialize, Serialize};
use tokio::task::JoinHandle;
use tracing::{info, warn};
use utoipa::ToSchema;

/// 예약/완료된 작업 수.
#[derive(Debug, Default)]
pub struct TaskStats {
    scheduled: AtomicU64,
    completed: AtomicU64,
}

/// [`TaskStats`] 스냅샷.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct TaskStatsSnapshot {
    pub scheduled: u64,
    pub completed: u64,
}

impl TaskStats {
    pub fn snapshot(&self) -> TaskStatsSnapshot {
        TaskStatsSnapshot {
            scheduled: self.scheduled.load(Ordering::Relaxed),
            completed: self.completed.load(Ordering::Relaxed),
        }
    }

    fn schedule(&self, count: u64) {
        self.scheduled.fetch_add(count, Ordering::Relaxed);
    }

    fn complete(&self) {
        self.completed.fetch_add(1, Ordering::Relaxed);
    }
}

/// 작업별 실행 시간.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TaskDurations {
    pub blocking: Duration,
    pub non_blocking: Duration,
}

impl Default for TaskDurations {
    fn default() -> Self {
        Self {
            blocking: Duration::from_secs(2),
            non_blocking: Duration::from_secs(3),
        }
    }
}

impl TaskDurations {
    /// 즉시 끝나는 작업 (테스트용).
    pub fn instant() -> Self {
        Self {
            blocking: Duration::ZERO,
            non_blocking: Duration::ZERO,
        }
    }
}

/// 두 작업을 예약하고 실행 핸들을 반환합니다.
///
/// 호출자는 핸들을 기다리지 않아도 됩니다.
pub fn spawn_demo_tasks(stats: Arc<TaskStats>, durations: TaskDurations) -> JoinHandle<()> {
    stats.schedule(2);

    tokio::spawn(async move {
        let blocking = durations.blocking;
        let result = tokio::task::spawn_blocking(move || {
            info!("Blocking task started");
            std::thread::sleep(blocking);
            info!("Blocking task finished");
        })
        .await;

        match result {
            Ok(()) => stats.complete(),
            Err(e) => warn!(error = %e, "Blocking task failed"),
        }

        info!("Async task started");
        tokio::time::sleep(durations.non_blocking).await;
        info!("Async task finished");
        stats.complete();
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_tasks_complete() {
        let stats = Arc::new(TaskStats::default());
        let handle = spawn_demo_tasks(stats.clone(), TaskDurations::instant());

        assert_eq!(stats.snapshot().scheduled, 2);
        handle.await.unwrap();
        assert_eq!(
            stats.snapshot(),
            TaskStatsSnapshot {
                scheduled: 2,
                completed: 2
            }
        );
    }

    #[tokio::test]
    async fn test_async_task_waits_for_duration() {
        let stats = Arc::new(TaskStats::default());
        let durations = TaskDurations {
            blocking: Duration::ZERO,
            non_blocking: Duration::from_millis(50),
        };

        let started = std::time::Instant::now();
        spawn_demo_tasks(stats.clone(), durations).await.unwrap();
        assert!(started.elapsed() >= Duration::from_millis(50));
        assert_eq!(stats.snapshot().completed, 2);
    }

    #[test]
    fn test_default_durations() {
        let durations = TaskDurations::default();
        assert_eq!(durations.blocking, Duration::from_secs(2));
        assert_eq!(durations.non_blocking, Duration::from_secs(3));
    }
}
