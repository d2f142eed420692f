//! Reply and inline keyboards

use teloxide::types::{InlineKeyboardButton, InlineKeyboardMarkup, KeyboardButton, KeyboardMarkup};

use crate::storage::Student;
use crate::telegram::replies::mark_button_label;

/// Callback data prefix of the mark menu buttons: `mark_<telegram id>`
pub const MARK_CALLBACK_PREFIX: &str = "mark_";

/// Reply keyboard with one flow per row
pub fn flow_keyboard(flows: &[String]) -> KeyboardMarkup {
    let rows: Vec<Vec<KeyboardButton>> = flows.iter().map(|flow| vec![KeyboardButton::new(flow.clone())]).collect();
    KeyboardMarkup::new(rows).resize_keyboard()
}

/// Inline keyboard with one button per student for /mark
pub fn mark_keyboard(students: &[Student], required: u32) -> InlineKeyboardMarkup {
    let rows: Vec<Vec<InlineKeyboardButton>> = students
        .iter()
        .map(|student| {
            vec![InlineKeyboardButton::callback(
                mark_button_label(student, required),
                mark_callback_data(student.telegram_id),
            )]
        })
        .collect();
    InlineKeyboardMarkup::new(rows)
}

pub fn mark_callback_data(telegram_id: i64) -> String {
    format!("{}{}", MARK_CALLBACK_PREFIX, telegram_id)
}

pub fn is_mark_callback(data: &str) -> bool {
    data.starts_with(MARK_CALLBACK_PREFIX)
}

/// Extracts the student id from mark callback data.
///
/// `None` for foreign or malformed payloads.
pub fn parse_mark_callback(data: &str) -> Option<i64> {
    data.strip_prefix(MARK_CALLBACK_PREFIX)?.parse().ok()
}
