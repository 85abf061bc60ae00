//! Line-based rendering of command results.
//!
//! Every function returns the text instead of printing it so the layout
//! can be tested.

use chrono::{DateTime, Utc};

use crate::auth::Session;
use crate::models::{AttendanceHistory, ClassItem, QrIssuance, ScanResult, StudentAttendanceHistory};

/// Line width for separators.
const LINE_WIDTH: usize = 60;

pub const OK: &str = "✓";
pub const FAIL: &str = "✗";

/// ```text
/// MY CLASSES
/// ════════════════════════════════════════════════════════════
/// ```
pub fn header(title: &str) -> String {
    format!("{}\n{}", title, "═".repeat(LINE_WIDTH))
}

fn rule() -> String {
    "─".repeat(LINE_WIDTH)
}

/// A one-line status, e.g. `✓ Logged in as Ann (student)`.
pub fn status(icon: &str, message: &str) -> String {
    format!("{} {}", icon, message)
}

pub fn session(session: Option<&Session>) -> String {
    match session {
        Some(s) => format!(
            "{}\n  Name:    {}\n  ID:      {}\n  Role:    {}\n  Since:   {}",
            header("SESSION"),
            s.display_name,
            s.user_id,
            s.role,
            s.last_updated.format("%Y-%m-%d %H:%M UTC"),
        ),
        None => status(FAIL, "Not logged in"),
    }
}

pub fn classes(classes: &[ClassItem]) -> String {
    let mut out = header("MY CLASSES");
    if classes.is_empty() {
        out.push_str("\n  No classes yet");
        return out;
    }
    for class in classes {
        out.push_str(&format!(
            "\n  {} ({})\n    id:       {}\n    schedule: {}\n    students: {}",
            class.class_name,
            class.section,
            class.id,
            class.schedule_label(),
            class.student_count(),
        ));
    }
    out
}

pub fn class_detail(title: &str, class: &ClassItem) -> String {
    format!(
        "{}\n  {} ({})\n  id:       {}\n  schedule: {}\n  students: {}",
        header(title),
        class.class_name,
        class.section,
        class.id,
        class.schedule_label(),
        class.student_count(),
    )
}

pub fn class_history(history: &AttendanceHistory) -> String {
    let info = &history.class_info;
    let stats = &history.overall_stats;
    let mut out = format!(
        "{}\n  Students: {}   Sessions: {}   Average: {:.1}%",
        header(&format!("{} ({})", info.name, info.section)),
        info.total_students,
        stats.total_classes,
        stats.average_attendance_percent,
    );

    out.push('\n');
    out.push_str(&rule());
    for student in &stats.students {
        out.push_str(&format!(
            "\n  {:<24} {:<12} {:>6.1}%",
            student.name, student.student_or_staff_id, student.attendance_percentage
        ));
    }

    out.push('\n');
    out.push_str(&rule());
    for entry in &history.history_entries {
        let roll = history.roll_call_for(entry);
        if roll.is_empty() {
            out.push_str(&format!(
                "\n  {}  {} present",
                entry.date,
                entry.present_student_ids.len()
            ));
            continue;
        }

        let present = roll.iter().filter(|r| r.present).count();
        out.push_str(&format!("\n  {}  {}/{} present", entry.date, present, roll.len()));
        let absent: Vec<&str> = roll
            .iter()
            .filter(|r| !r.present)
            .map(|r| r.student.name.as_str())
            .collect();
        if !absent.is_empty() {
            out.push_str(&format!("\n    absent: {}", absent.join(", ")));
        }
    }
    out
}

pub fn student_history(history: &StudentAttendanceHistory) -> String {
    let mut out = format!(
        "{}\n  Attended {} of {} ({:.1}%)",
        header(&format!(
            "{} ({})",
            history.class_info.name, history.class_info.section
        )),
        history.attended_classes,
        history.total_classes,
        history.attendance_percentage,
    );
    for record in &history.records {
        let icon = if record.present { OK } else { FAIL };
        out.push_str(&format!("\n  {} {}", icon, record.date));
    }
    out
}

pub fn scan(result: &ScanResult) -> String {
    let icon = if result.success { OK } else { FAIL };
    match &result.attendance_record_id {
        Some(id) => format!("{} {} (record {})", icon, result.message, id),
        None => status(icon, &result.message),
    }
}

pub fn qr(qr: &QrIssuance, now: DateTime<Utc>, saved_to: Option<&str>) -> String {
    let remaining = (qr.expires_at - now).num_seconds().max(0);
    let mut out = format!(
        "{}\n  Session: {}\n  Expires: {} ({}s left)",
        header("ATTENDANCE QR CODE"),
        qr.attendance_session_id,
        qr.expires_at.format("%H:%M:%S UTC"),
        remaining,
    );
    match saved_to {
        Some(path) => out.push_str(&format!("\n  Image:   {}", path)),
        None => out.push_str(&format!("\n  Image:   {} base64 chars", qr.qr_image_payload.len())),
    }
    out
}
