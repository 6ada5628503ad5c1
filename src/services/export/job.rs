use std::path::PathBuf;
use std::sync::mpsc::{self, Receiver, TryRecvError};
use std::thread;

use super::{ExportError, ExportRequest};

type ExportResult = Result<PathBuf, ExportError>;

/// One export running on a worker thread. Poll once per frame; the job is
/// busy until a result (or a lost worker) has been observed.
#[derive(Default)]
pub struct ExportJob {
    receiver: Option<Receiver<ExportResult>>,
}

impl ExportJob {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_busy(&self) -> bool {
        self.receiver.is_some()
    }

    /// Starts the export. Refused without spawning when another export is
    /// running or there are no events.
    pub fn start(&mut self, request: ExportRequest) -> Result<(), ExportError> {
        if request.events.is_empty() {
            return Err(ExportError::NothingToExport);
        }
        if self.is_busy() {
            log::warn!("Export already in progress, ignoring request");
            return Ok(());
        }

        let (tx, rx) = mpsc::channel();
        self.receiver = Some(rx);

        log::info!("Starting {:?} export to {}", request.format, request.path.display());
        thread::spawn(move || {
            let result = request.run();
            if let Err(e) = &result {
                log::error!("Export failed: {}", e);
            }
            let _ = tx.send(result);
        });

        Ok(())
    }

    /// Finished result, if any. Clears the busy state on every outcome.
    pub fn poll(&mut self) -> Option<ExportResult> {
        let rx = self.receiver.as_ref()?;
        match rx.try_recv() {
            Ok(result) => {
                self.receiver = None;
                Some(result)
            }
            Err(TryRecvError::Empty) => None,
            Err(TryRecvError::Disconnected) => {
                self.receiver = None;
                Some(Err(ExportError::WorkerLost))
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::day::DayOfWeek;
    use crate::models::event::ScheduleEvent;
    use crate::models::viewport::GridViewport;
    use crate::services::export::ExportFormat;
    use std::time::{Duration, Instant};

    fn wait(job: &mut ExportJob) -> ExportResult {
        let deadline = Instant::now() + Duration::from_secs(10);
        loop {
            if let Some(result) = job.poll() {
                return result;
            }
            assert!(Instant::now() < deadline, "export did not finish");
            thread::sleep(Duration::from_millis(10));
        }
    }

    fn request(path: PathBuf, events: Vec<ScheduleEvent>) -> ExportRequest {
        ExportRequest {
            format: ExportFormat::Csv,
            path,
            child_name: "Mina".into(),
            events,
            school_times: Vec::new(),
            viewport: GridViewport::default(),
            raster_scale: 1,
        }
    }

    #[test]
    fn test_job_runs_and_clears_busy() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("plan.csv");
        let event = ScheduleEvent::new(
            "child1",
            "Piano",
            DayOfWeek::Mon,
            "15:00".parse().unwrap(),
            "16:00".parse().unwrap(),
        )
        .unwrap();

        let mut job = ExportJob::new();
        job.start(request(path.clone(), vec![event])).unwrap();
        assert!(job.is_busy());

        let written = wait(&mut job).unwrap();
        assert_eq!(written, path);
        assert!(!job.is_busy());
        assert!(path.exists());
    }

    #[test]
    fn test_failed_job_clears_busy() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("missing").join("plan.csv");
        let event = ScheduleEvent::new(
            "child1",
            "Piano",
            DayOfWeek::Mon,
            "15:00".parse().unwrap(),
            "16:00".parse().unwrap(),
        )
        .unwrap();

        let mut job = ExportJob::new();
        job.start(request(path, vec![event])).unwrap();
        assert!(wait(&mut job).is_err());
        assert!(!job.is_busy());
    }

    #[test]
    fn test_empty_request_is_refused_synchronously() {
        let dir = tempfile::tempdir().unwrap();
        let mut job = ExportJob::new();
        let result = job.start(request(dir.path().join("x.csv"), Vec::new()));
        assert!(matches!(result, Err(ExportError::NothingToExport)));
        assert!(!job.is_busy());
        assert!(job.poll().is_none());
    }
}
