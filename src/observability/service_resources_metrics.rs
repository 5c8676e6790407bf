use crate::observability::metrics::get_metrics;
use anyhow::{anyhow, Result};
use std::time::{Duration, SystemTime, UNIX_EPOCH};
use sysinfo::{ProcessRefreshKind, ProcessesToUpdate, System};
use tokio::time::sleep;

const SCRAPE_INTERVAL_SECONDS: u64 = 5;

/// Sample this process' cpu, memory and fd usage into the metrics registry
pub async fn collect_process_metrics(is_metrics_enabled: bool) -> Result<()> {
    if !is_metrics_enabled {
        return Ok(());
    }
    let metrics = get_metrics().await;
    let mut sys = System::new();
    let pid = sysinfo::get_current_pid().map_err(|e| anyhow!("cannot resolve own pid: {}", e))?;

    let start_time_unix = unix_now()?;
    metrics.process_start_time.set(start_time_unix);

    loop {
        let pids = [pid];
        sys.refresh_processes_specifics(
            ProcessesToUpdate::Some(&pids),
            false,
            ProcessRefreshKind::nothing().with_cpu().with_memory(),
        );

        if let Some(proc) = sys.process(pid) {
            metrics.process_cpu_usage.set(proc.cpu_usage().into());
            metrics.process_memory_usage.set(proc.memory() as i64);

            #[cfg(target_family = "unix")]
            {
                if let Ok(entries) = std::fs::read_dir(format!("/proc/{}/fd", pid.as_u32())) {
                    metrics.process_open_fds.set(entries.count() as i64);
                }
            }

            metrics.process_uptime.set(unix_now()? - start_time_unix);
        }

        sleep(Duration::from_secs(SCRAPE_INTERVAL_SECONDS)).await;
    }
}

fn unix_now() -> Result<i64> {
    Ok(SystemTime::now().duration_since(UNIX_EPOCH)?.as_secs() as i64)
}
