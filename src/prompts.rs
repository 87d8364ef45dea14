use chrono::{Datelike, NaiveDate, Utc};

/// Thirty daily reflection prompts, rotated by day of year.
pub const REFLECTION_PROMPTS: [&str; 30] = [
    "What is one thing you're grateful for today?",
    "What made you smile or laugh today?",
    "What is something kind you did for yourself or someone else?",
    "What challenge did you overcome today, no matter how small?",
    "What emotion are you feeling right now, and why?",
    "What is one thing you learned about yourself today?",
    "How did you take care of your mental health today?",
    "What are three things that brought you joy this week?",
    "What is one fear you're working on letting go of?",
    "How did you show yourself compassion today?",
    "What is something you're proud of accomplishing recently?",
    "What relationship in your life are you most grateful for?",
    "What is one positive change you've noticed in yourself lately?",
    "How do you want to feel tomorrow, and what can help you get there?",
    "What boundary did you set or maintain today?",
    "What is something you're looking forward to?",
    "How did you practice self-care today?",
    "What mistake did you make, and what did you learn from it?",
    "What is one thing you need to forgive yourself for?",
    "How did you step outside your comfort zone today?",
    "What is a strength you used today?",
    "What negative thought did you challenge today?",
    "How did you connect with others today?",
    "What is something beautiful you noticed today?",
    "What progress have you made toward a personal goal?",
    "What is one thing you love about yourself?",
    "How did you practice mindfulness or being present today?",
    "What is something you're working on accepting?",
    "What brought you peace or calm today?",
    "What is one hope you have for your future self?",
];

/// Prompt for the current UTC day.
pub fn daily_prompt() -> &'static str {
    prompt_for_date(Utc::now().date_naive())
}

/// Prompt for a specific date. Day of year is 1-based (Jan 1 is day 1), so
/// the rotation restarts every 30 days and is stable for a given date.
pub fn prompt_for_date(date: NaiveDate) -> &'static str {
    let day_of_year = date.ordinal() as usize;
    REFLECTION_PROMPTS[day_of_year % REFLECTION_PROMPTS.len()]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_same_date_same_prompt() {
        let date = NaiveDate::from_ymd_opt(2026, 8, 5).unwrap();
        assert_eq!(prompt_for_date(date), prompt_for_date(date));
    }

    #[test]
    fn test_rotation_wraps_after_thirty_days() {
        let start = NaiveDate::from_ymd_opt(2026, 3, 1).unwrap();
        let thirty_later = start + chrono::Duration::days(30);
        assert_eq!(prompt_for_date(start), prompt_for_date(thirty_later));
    }

    #[test]
    fn test_consecutive_days_differ() {
        let date = NaiveDate::from_ymd_opt(2026, 3, 1).unwrap();
        let next = date + chrono::Duration::days(1);
        assert_ne!(prompt_for_date(date), prompt_for_date(next));
    }

    #[test]
    fn test_jan_first_uses_index_one() {
        let jan_first = NaiveDate::from_ymd_opt(2026, 1, 1).unwrap();
        assert_eq!(prompt_for_date(jan_first), REFLECTION_PROMPTS[1]);
    }

    #[test]
    fn test_every_day_of_year_in_bounds() {
        let mut date = NaiveDate::from_ymd_opt(2024, 1, 1).unwrap();
        let end = NaiveDate::from_ymd_opt(2024, 12, 31).unwrap();
        while date <= end {
            // Panics on out-of-bounds indexing if the modulo is wrong.
            let _ = prompt_for_date(date);
            date = date.succ_opt().unwrap();
        }
    }
}
