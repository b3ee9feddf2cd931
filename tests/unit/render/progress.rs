use super::*;

#[test]
fn reports_every_nth_and_final_completion() {
    let mut p = Progress::new("QR Codes", 45, 20);
    let emitted: Vec<usize> = (0..45)
        .filter_map(|_| p.record().map(|_| p.completed()))
        .collect();
    assert_eq!(emitted, vec![20, 40, 45]);
}

#[test]
fn completed_count_is_monotonic_and_capped() {
    let mut p = Progress::new("x", 3, 1);
    let mut last = 0;
    for _ in 0..5 {
        p.record();
        assert!(p.completed() >= last);
        last = p.completed();
    }
    assert_eq!(last, 3);
}

#[test]
fn eta_extrapolates_average_task_time() {
    assert_eq!(eta(Duration::from_secs(10), 0, 10), None);
    assert_eq!(
        eta(Duration::from_secs(10), 5, 10),
        Some(Duration::from_secs(10))
    );
    assert_eq!(
        eta(Duration::from_secs(4), 4, 4),
        Some(Duration::ZERO)
    );
}

#[test]
fn line_format_is_readable() {
    let line = format_line("QR Codes", 20, 80, Duration::from_secs(2));
    assert_eq!(line, "QR Codes 20/80 (25%) elapsed 2.0s eta 6.0s");
}
