//! Fixed reply strings and reply formatting for Telegram output.

use crate::nutrition::Product;

pub const GREETING: &str = "📸 Отправь фото еды или напиши название блюда — я подскажу калории!\n\
     Примеры: «омлет», «банан», «пицца маргарита»";

pub const SEARCHING: &str = "🔍 Ищу информацию о калориях...";

pub const NOT_FOUND: &str = "❌ Не нашёл информацию об этом блюде. Попробуй другое название.";

/// Generic failure message. Raw lookup errors are logged for operators,
/// never shown to the user.
pub const LOOKUP_FAILED: &str = "⚠️ Произошла ошибка. Попробуйте еще раз.";

pub const PHOTO_NOT_SUPPORTED: &str = "📸 Фото получено!\n\
     ⚠️ В бесплатной версии я пока распознаю только текст. \
     Отправь название блюда словами — например, «гречка с курицей».";

/// Format a successful lookup. The query string stands in for a missing
/// title, and a missing calorie count renders as the "неизвестно" sentinel.
pub fn format_found(query: &str, product: &Product) -> String {
    let title = product.title.as_deref().unwrap_or(query);
    let calories = match product.calories {
        Some(value) => format!("{value:.0}"),
        None => "неизвестно".to_string(),
    };
    format!("✅ {title}\n🔥 Калории: ~{calories} ккал на 100г")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn formats_title_and_calories() {
        let product = Product {
            title: Some("Pizza Margherita".to_string()),
            calories: Some(266.0),
        };
        assert_eq!(
            format_found("пицца маргарита", &product),
            "✅ Pizza Margherita\n🔥 Калории: ~266 ккал на 100г"
        );
    }

    #[test]
    fn missing_title_falls_back_to_query() {
        let product = Product {
            title: None,
            calories: Some(95.0),
        };
        assert_eq!(
            format_found("яблоко", &product),
            "✅ яблоко\n🔥 Калории: ~95 ккал на 100г"
        );
    }

    #[test]
    fn missing_calories_render_as_unknown() {
        let product = Product {
            title: Some("Borscht".to_string()),
            calories: None,
        };
        assert_eq!(
            format_found("борщ", &product),
            "✅ Borscht\n🔥 Калории: ~неизвестно ккал на 100г"
        );
    }

    #[test]
    fn not_found_message_is_exact() {
        assert_eq!(
            NOT_FOUND,
            "❌ Не нашёл информацию об этом блюде. Попробуй другое название."
        );
    }
}
