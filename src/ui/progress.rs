use indicatif::{MultiProgress, ProgressBar, ProgressStyle};
use std::sync::Arc;
use std::time::Duration;

pub struct ProgressReporter {
    multi_progress: Arc<MultiProgress>,
    upload_spinner: Option<ProgressBar>,
    probe_progress: Option<ProgressBar>,
    enabled: bool,
}

impl ProgressReporter {
    pub fn new(enabled: bool) -> Self {
        Self {
            multi_progress: Arc::new(MultiProgress::new()),
            upload_spinner: None,
            probe_progress: None,
            enabled,
        }
    }

    pub fn is_enabled(&self) -> bool {
        self.enabled
    }

    pub fn start_upload(&mut self, file_name: &str) {
        if !self.enabled {
            return;
        }

        let pb = self.multi_progress.add(ProgressBar::new_spinner());
        pb.set_style(
            ProgressStyle::default_spinner()
                .template("{spinner:.green} {msg}")
                .unwrap_or_else(|_| ProgressStyle::default_spinner()),
        );
        pb.set_message(format!("Uploading {file_name}"));
        pb.enable_steady_tick(Duration::from_millis(120));
        self.upload_spinner = Some(pb);
    }

    pub fn finish_upload(&self, status: Option<u16>) {
        if let Some(ref pb) = self.upload_spinner {
            match status {
                Some(code) => pb.finish_with_message(format!("✓ Upload answered {code}")),
                None => pb.abandon_with_message("✗ Upload failed"),
            }
        }
    }

    pub fn start_probing(&mut self, total_candidates: usize) {
        if !self.enabled {
            return;
        }

        let pb = self
            .multi_progress
            .add(ProgressBar::new(total_candidates as u64));
        pb.set_style(
            ProgressStyle::default_bar()
                .template("{spinner:.green} [{elapsed_precise}] [{bar:40.yellow/red}] {pos}/{len} paths probed ({eta}) {msg}")
                .unwrap_or_else(|_| ProgressStyle::default_bar())
                .progress_chars("#>-"),
        );
        pb.set_message("Probing candidate paths");
        pb.enable_steady_tick(Duration::from_millis(120));
        self.probe_progress = Some(pb);
    }

    pub fn update_probe_progress(&self, current: usize) {
        if let Some(ref pb) = self.probe_progress {
            pb.set_position(current as u64);
        }
    }

    pub fn finish_probing(&self, found: bool) {
        if let Some(ref pb) = self.probe_progress {
            let message = if found {
                "✓ Uploaded file located"
            } else {
                "✓ All candidates probed"
            };
            pb.finish_with_message(message);
        }
    }

    pub fn abandon_probing(&self) {
        if let Some(ref pb) = self.probe_progress {
            pb.abandon_with_message("✗ Probing aborted");
        }
    }

    pub fn finish_and_clear(&self) {
        if self.enabled {
            self.multi_progress.clear().unwrap_or(());
        }
    }

    pub fn log_warning(&self, message: &str) {
        if self.enabled {
            self.multi_progress
                .println(format!("⚠ {message}"))
                .unwrap_or(());
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_progress_reporter_creation() {
        let reporter = ProgressReporter::new(true);
        assert!(reporter.is_enabled());
        assert!(reporter.upload_spinner.is_none());
        assert!(reporter.probe_progress.is_none());
    }

    #[test]
    fn test_progress_methods_dont_panic_when_disabled() {
        let mut reporter = ProgressReporter::new(false);

        reporter.start_upload("a.txt");
        reporter.finish_upload(Some(200));

        reporter.start_probing(20);
        reporter.update_probe_progress(10);
        reporter.finish_probing(false);
        reporter.abandon_probing();

        reporter.log_warning("test");
        reporter.finish_and_clear();

        assert!(reporter.probe_progress.is_none());
    }

    #[test]
    fn test_enabled_progress_reporter() {
        let mut reporter = ProgressReporter::new(true);

        reporter.start_upload("report.pdf");
        assert!(reporter.upload_spinner.is_some());
        reporter.finish_upload(None);

        reporter.start_probing(1114);
        assert!(reporter.probe_progress.is_some());
        reporter.update_probe_progress(47);
        reporter.finish_probing(true);
    }

    #[test]
    fn test_probe_bar_shows_final_message() {
        let mut reporter = ProgressReporter::new(true);

        reporter.start_probing(3);
        reporter.finish_probing(true);
        let pb = reporter.probe_progress.as_ref().unwrap();
        assert_eq!(pb.message(), "✓ Uploaded file located");

        reporter.start_probing(3);
        reporter.abandon_probing();
        let pb = reporter.probe_progress.as_ref().unwrap();
        assert_eq!(pb.message(), "✗ Probing aborted");
    }

    #[test]
    fn test_progress_zero_candidates() {
        let mut reporter = ProgressReporter::new(true);
        reporter.start_probing(0);
        reporter.update_probe_progress(0);
        reporter.finish_probing(false);
    }

    #[test]
    fn test_progress_reporter_is_send_sync() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<ProgressReporter>();
    }
}
