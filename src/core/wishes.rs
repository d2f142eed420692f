//! Motivational phrases attached to visit notifications

use rand::Rng;

/// Fixed phrase pool
pub const WISHES: &[&str] = &[
    "Так держать! 💪",
    "Отличная работа, продолжай в том же духе!",
    "Каждая тренировка делает тебя сильнее!",
    "Спорт — это жизнь! Ты молодец!",
    "Ещё один шаг к цели! 🏃",
    "Здоровье в порядке — спасибо зарядке!",
    "Ты на верном пути! 🔥",
    "Движение — залог хорошего настроения!",
    "Гордимся твоим упорством!",
    "Не останавливайся на достигнутом! ⭐",
];

/// Picks a phrase uniformly at random using the given RNG.
pub fn pick_wish<R: Rng + ?Sized>(rng: &mut R) -> &'static str {
    WISHES[rng.gen_range(0..WISHES.len())]
}

/// Picks a phrase using the thread-local RNG.
pub fn random_wish() -> &'static str {
    pick_wish(&mut rand::thread_rng())
}
