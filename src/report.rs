//! Human-readable output of the library's reports.

use wallman_library::merge::MergeReport;
use wallman_library::originals::OrphanReport;
use wallman_library::reconcile::ReconcileReport;
use wallman_library::scan::ScanReport;
use wallman_library::sort_in::SortInReport;
use wallman_library::stats::Stats;

pub fn scan(report: &ScanReport) {
    println!("{} wallpapers, {} with an original", report.wallpapers, report.with_original);
    for path in &report.skipped {
        println!("  skipped {}", path.display());
    }
}

pub fn stats(stats: &Stats) {
    println!("Wallpapers:       {}", stats.total);
    println!("Without original: {} ({}%)", stats.without_original, stats.without_original_percent);
    for t in &stats.types {
        println!();
        println!("{} ({} wallpapers)", t.name, t.wallpapers);
        for franchise in &t.franchises {
            println!("  {franchise}");
        }
    }
}

pub fn sort_in(report: &SortInReport) {
    for label in &report.added {
        println!("added {label}");
    }
    for path in &report.skipped {
        println!("skipped {}", path.display());
    }
    println!("{} added, {} skipped", report.added.len(), report.skipped.len());
}

pub fn fix_indexes(report: &ReconcileReport) {
    for correction in &report.corrected {
        println!("{} -> {}", correction.before, correction.after);
    }
    println!("{} unchanged, {} corrected", report.unchanged, report.corrected.len());
}

pub fn orphans(report: &OrphanReport) {
    for path in &report.orphans {
        println!("{}", path.display());
    }
    match (report.orphans.len(), report.moved) {
        (0, _) => println!("no orphaned originals"),
        (n, true) => println!("{n} orphaned originals moved to the trash"),
        (n, false) => println!("{n} orphaned originals, run with --apply to move them to the trash"),
    }
}

pub fn merge(report: &MergeReport) {
    println!("{} old images deleted, {} wallpapers copied", report.deleted, report.copied);
}
