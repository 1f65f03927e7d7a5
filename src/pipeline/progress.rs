// file: src/pipeline/progress.rs
// description: progress tracking and statistics reporting for batch imports
// reference: uses indicatif for progress bars and tracks row-level metrics

use indicatif::{MultiProgress, ProgressBar, ProgressStyle};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::Instant;

#[derive(Debug, Clone, Default)]
pub struct BatchStats {
    pub files_processed: usize,
    pub files_failed: usize,
    pub rows_valid: usize,
    pub rows_rejected: usize,
    pub duration_secs: u64,
}

impl BatchStats {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn rows_per_second(&self) -> f64 {
        if self.duration_secs == 0 {
            return 0.0;
        }
        self.rows_valid as f64 / self.duration_secs as f64
    }

    pub fn file_success_rate(&self) -> f64 {
        let total = self.files_processed + self.files_failed;
        if total == 0 {
            return 0.0;
        }
        (self.files_processed as f64 / total as f64) * 100.0
    }

    pub fn row_acceptance_rate(&self) -> f64 {
        let total = self.rows_valid + self.rows_rejected;
        if total == 0 {
            return 0.0;
        }
        (self.rows_valid as f64 / total as f64) * 100.0
    }
}

pub struct ImportProgress {
    main_bar: ProgressBar,
    detail_bar: ProgressBar,
    files_processed: Arc<AtomicUsize>,
    files_failed: Arc<AtomicUsize>,
    rows_valid: Arc<AtomicUsize>,
    rows_rejected: Arc<AtomicUsize>,
    start_time: Instant,
}

impl ImportProgress {
    pub fn new(total_files: usize) -> Self {
        Self::with_color(total_files, true)
    }

    pub fn with_color(total_files: usize, colored: bool) -> Self {
        let multi_progress = MultiProgress::new();

        let main_bar = create_progress_bar(&multi_progress, total_files as u64, colored);
        let detail_bar = create_detail_bar(&multi_progress);

        Self {
            main_bar,
            detail_bar,
            files_processed: Arc::new(AtomicUsize::new(0)),
            files_failed: Arc::new(AtomicUsize::new(0)),
            rows_valid: Arc::new(AtomicUsize::new(0)),
            rows_rejected: Arc::new(AtomicUsize::new(0)),
            start_time: Instant::now(),
        }
    }

    pub fn inc_files_processed(&self) {
        self.files_processed.fetch_add(1, Ordering::SeqCst);
        self.main_bar.inc(1);
        self.update_detail_bar();
    }

    pub fn inc_files_failed(&self) {
        self.files_failed.fetch_add(1, Ordering::SeqCst);
        self.main_bar.inc(1);
        self.update_detail_bar();
    }

    pub fn add_rows_valid(&self, count: usize) {
        self.rows_valid.fetch_add(count, Ordering::SeqCst);
    }

    pub fn add_rows_rejected(&self, count: usize) {
        self.rows_rejected.fetch_add(count, Ordering::SeqCst);
    }

    pub fn set_message(&self, message: String) {
        self.detail_bar.set_message(message);
    }

    pub fn finish(&self) {
        self.main_bar.finish_with_message("Import complete");
        self.detail_bar.finish_and_clear();
    }

    pub fn get_stats(&self) -> BatchStats {
        BatchStats {
            files_processed: self.files_processed.load(Ordering::SeqCst),
            files_failed: self.files_failed.load(Ordering::SeqCst),
            rows_valid: self.rows_valid.load(Ordering::SeqCst),
            rows_rejected: self.rows_rejected.load(Ordering::SeqCst),
            duration_secs: self.start_time.elapsed().as_secs(),
        }
    }

    fn update_detail_bar(&self) {
        let rows = self.rows_valid.load(Ordering::SeqCst);
        let rejected = self.rows_rejected.load(Ordering::SeqCst);
        let failed = self.files_failed.load(Ordering::SeqCst);

        self.detail_bar.set_message(format!(
            "Rows: {} | Rejected: {} | Failed files: {}",
            rows, rejected, failed
        ));
    }
}

impl Drop for ImportProgress {
    fn drop(&mut self) {
        self.finish();
    }
}

fn create_progress_bar(multi_progress: &MultiProgress, total: u64, colored: bool) -> ProgressBar {
    let bar = multi_progress.add(ProgressBar::new(total));
    if colored {
        bar.set_style(
            ProgressStyle::default_bar()
                .template(
                    "{spinner:.green} [{elapsed_precise}] [{bar:40.cyan/blue}] {pos}/{len} ({eta}) {msg}",
                )
                .expect("Failed to create progress bar template")
                .progress_chars("█▓▒░"),
        );
    } else {
        bar.set_style(
            ProgressStyle::default_bar()
                .template("{spinner} [{elapsed_precise}] [{bar:40}] {pos}/{len} ({eta}) {msg}")
                .expect("Failed to create progress bar template")
                .progress_chars("=>-"),
        );
    }
    bar
}

fn create_detail_bar(multi_progress: &MultiProgress) -> ProgressBar {
    let bar = multi_progress.add(ProgressBar::new(0));
    let style = ProgressStyle::default_bar()
        .template("{msg}")
        .expect("Failed to create detail bar template");
    bar.set_style(style);
    bar
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_batch_stats_rates() {
        let mut stats = BatchStats::new();
        stats.files_processed = 9;
        stats.files_failed = 1;
        stats.rows_valid = 90;
        stats.rows_rejected = 10;
        stats.duration_secs = 9;

        assert_eq!(stats.rows_per_second(), 10.0);
        assert_eq!(stats.file_success_rate(), 90.0);
        assert_eq!(stats.row_acceptance_rate(), 90.0);
    }

    #[test]
    fn test_batch_stats_zero_duration() {
        let stats = BatchStats::new();
        assert_eq!(stats.rows_per_second(), 0.0);
        assert_eq!(stats.file_success_rate(), 0.0);
        assert_eq!(stats.row_acceptance_rate(), 0.0);
    }

    #[test]
    fn test_progress_counters() {
        let progress = ImportProgress::with_color(5, false);

        progress.inc_files_processed();
        progress.inc_files_failed();
        progress.add_rows_valid(12);
        progress.add_rows_rejected(3);

        let stats = progress.get_stats();
        assert_eq!(stats.files_processed, 1);
        assert_eq!(stats.files_failed, 1);
        assert_eq!(stats.rows_valid, 12);
        assert_eq!(stats.rows_rejected, 3);
    }
}
