//! User-facing texts
//!
//! Pure string construction, no I/O.

use crate::storage::Student;

pub const WELCOME: &str = "Добро пожаловать в бот учёта посещений физкультуры!\n\n\
    Доступные команды:\n\
    /register - Регистрация\n\
    /info - Информация о посещениях\n";

pub const ADMIN_HELP: &str = "Команды администратора:\n\
    /list - Список всех учеников\n\
    /mark - Отметить посещение";

pub const ALREADY_REGISTERED: &str = "Вы уже зарегистрированы!";
pub const ASK_FULL_NAME: &str = "Пожалуйста, введите ваше ФИО:";
pub const FULL_NAME_FORMAT: &str = "Пожалуйста, введите ФИО в формате: Фамилия Имя Отчество\n\
    Например: Иванов Иван Иванович";
pub const ASK_FLOW: &str = "Выберите ваш поток:";
pub const UNKNOWN_FLOW: &str = "Пожалуйста, выберите поток из предложенных вариантов.";
pub const REGISTRATION_DONE: &str = "Регистрация успешно завершена!";
pub const REGISTRATION_FAILED: &str = "Произошла ошибка при регистрации. Попробуйте позже.";
pub const NOT_REGISTERED: &str = "Вы не зарегистрированы. Используйте /register";
pub const CONGRATULATIONS: &str = "Поздравляем! Вы получили зачёт по физкультуре!";
pub const ACCESS_DENIED: &str = "У вас нет доступа к этой команде.";
pub const EMPTY_LIST: &str = "Список учеников пуст.";
pub const MARK_PROMPT: &str = "Выберите ученика для отметки посещения:";
pub const STUDENT_NOT_FOUND: &str = "Ученик не найден.";

const LIST_HEADER: &str = "Список учеников:\n\n";

/// Maximum message length for Telegram (with margin)
pub const MAX_MESSAGE_LENGTH: usize = 4000;

/// Visits still missing before the quota is met
pub fn remaining_visits(visits: u32, required: u32) -> u32 {
    required.saturating_sub(visits)
}

/// Attendance state relative to the quota
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Progress {
    InProgress { visits: u32, remaining: u32 },
    Completed,
}

impl Progress {
    pub fn of(visits: u32, required: u32) -> Self {
        match remaining_visits(visits, required) {
            0 => Progress::Completed,
            remaining => Progress::InProgress { visits, remaining },
        }
    }
}

/// Reply for /info and the end of registration
pub fn attendance_summary(visits: u32, required: u32) -> String {
    match Progress::of(visits, required) {
        Progress::Completed => CONGRATULATIONS.to_string(),
        Progress::InProgress { visits, remaining } => {
            format!("Количество посещений: {}\nДо зачёта осталось: {}", visits, remaining)
        }
    }
}

/// Message pushed to a student after an admin marks a visit
pub fn visit_marked_notification(student: &Student, required: u32, wish: &str) -> String {
    let status = match Progress::of(student.visits, required) {
        Progress::Completed => CONGRATULATIONS.to_string(),
        Progress::InProgress { remaining, .. } => format!("До зачёта осталось: {}", remaining),
    };
    format!(
        "Отмечено посещение!\nКоличество посещений: {}\n{}\n\n{}",
        student.visits, status, wish
    )
}

/// Replacement text for the admin's mark menu
pub fn visit_marked_confirmation(student: &Student, required: u32) -> String {
    format!(
        "✅ Посещение отмечено для {}\nТекущее количество: {}/{}",
        student.full_name, student.visits, required
    )
}

/// Label of a student's button in the mark menu
pub fn mark_button_label(student: &Student, required: u32) -> String {
    format!("{} ({}/{})", student.full_name, student.visits, required)
}

fn student_block(student: &Student) -> String {
    let block = format!(
        "ID: {}\nФИО: {}\nПоток: {}\nПосещений: {}\n\n",
        student.telegram_id, student.full_name, student.flow, student.visits
    );

    // A block must fit in a message together with the header
    let max_block = MAX_MESSAGE_LENGTH - LIST_HEADER.chars().count();
    if block.chars().count() <= max_block {
        return block;
    }
    let mut truncated: String = block.chars().take(max_block - 3).collect();
    truncated.push_str("…\n\n");
    truncated
}

/// Student listing for /list, split into messages under the Telegram limit.
///
/// Blocks are never split across messages; a block too long for one message
/// is truncated. Empty input yields no messages.
pub fn student_list_messages(students: &[Student]) -> Vec<String> {
    let mut messages = Vec::new();
    let mut current = String::from(LIST_HEADER);
    let mut current_len = current.chars().count();
    let mut has_block = false;

    for student in students {
        let block = student_block(student);
        let block_len = block.chars().count();
        if has_block && current_len + block_len > MAX_MESSAGE_LENGTH {
            messages.push(std::mem::take(&mut current));
            current_len = 0;
        }
        current.push_str(&block);
        current_len += block_len;
        has_block = true;
    }

    if has_block {
        messages.push(current);
    }
    messages
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn student(id: i64, name: &str, visits: u32) -> Student {
        Student {
            telegram_id: id,
            full_name: name.to_string(),
            flow: "Север".to_string(),
            visits,
            registered_at: "2024-09-01 10:00:00".to_string(),
        }
    }

    #[test]
    fn test_remaining_never_negative() {
        assert_eq!(remaining_visits(0, 5), 5);
        assert_eq!(remaining_visits(4, 5), 1);
        assert_eq!(remaining_visits(5, 5), 0);
        assert_eq!(remaining_visits(9, 5), 0);
    }

    #[test]
    fn test_summary_numeric_until_quota() {
        assert_eq!(
            attendance_summary(0, 5),
            "Количество посещений: 0\nДо зачёта осталось: 5"
        );
        assert_eq!(attendance_summary(5, 5), CONGRATULATIONS);
        assert_eq!(attendance_summary(6, 5), CONGRATULATIONS);
    }

    #[test]
    fn test_notification_branches() {
        let text = visit_marked_notification(&student(1, "А Б В", 3), 5, "Так держать!");
        assert_eq!(
            text,
            "Отмечено посещение!\nКоличество посещений: 3\nДо зачёта осталось: 2\n\nТак держать!"
        );

        let done = visit_marked_notification(&student(1, "А Б В", 5), 5, "Ура");
        assert!(done.contains(CONGRATULATIONS));
        assert!(!done.contains("До зачёта осталось"));
    }

    #[test]
    fn test_confirmation_and_label() {
        let s = student(1, "Иванов Иван Иванович", 2);
        assert_eq!(mark_button_label(&s, 5), "Иванов Иван Иванович (2/5)");
        assert_eq!(
            visit_marked_confirmation(&s, 5),
            "✅ Посещение отмечено для Иванов Иван Иванович\nТекущее количество: 2/5"
        );
    }

    #[test]
    fn test_list_single_message() {
        let messages = student_list_messages(&[student(10, "А Б В", 1), student(11, "Г Д Е", 0)]);
        assert_eq!(messages.len(), 1);
        assert!(messages[0].starts_with("Список учеников:\n\n"));
        assert!(messages[0].contains("ID: 10\nФИО: А Б В\nПоток: Север\nПосещений: 1\n\n"));
        assert!(messages[0].contains("ID: 11"));
    }

    #[test]
    fn test_list_empty_yields_nothing() {
        assert!(student_list_messages(&[]).is_empty());
    }

    #[test]
    fn test_list_splits_long_output() {
        let long_name = "Оченьдлиннаяфамилия ".repeat(3);
        let students: Vec<Student> = (0..200).map(|i| student(i, long_name.trim(), 0)).collect();
        let messages = student_list_messages(&students);

        assert!(messages.len() > 1);
        for message in &messages {
            assert!(message.chars().count() <= MAX_MESSAGE_LENGTH);
        }
        let total: usize = messages.iter().map(|m| m.matches("ID: ").count()).sum();
        assert_eq!(total, 200);
    }

    #[test]
    fn test_list_truncates_oversized_name() {
        let huge_name = format!("{} Б В", "А".repeat(4080));
        let messages = student_list_messages(&[student(1, &huge_name, 0), student(2, "Г Д Е", 3)]);

        assert_eq!(messages.len(), 2);
        assert!(messages[0].starts_with("Список учеников:\n\nID: 1\n"));
        assert!(messages[0].ends_with("…\n\n"));
        for message in &messages {
            assert!(message.chars().count() <= MAX_MESSAGE_LENGTH);
        }
        assert!(messages[1].starts_with("ID: 2\n"));
    }
}
