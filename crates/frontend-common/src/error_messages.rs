//! User-facing error messages

use vyshivka_http::{ClientError, SessionError};

/// Message for a failed login or session operation
pub fn session_error(error: &SessionError) -> String {
    match error {
        SessionError::AuthRejected(_) => "Неверная электронная почта или пароль.".to_string(),
        SessionError::IdentityFetchFailed(_) | SessionError::Interrupted => {
            "Не удалось загрузить профиль. Попробуйте войти ещё раз.".to_string()
        }
        SessionError::Client(error) => request_error(error),
        other => other.to_string(),
    }
}

/// Message for a failed API call made from a view
pub fn request_error(error: &ClientError) -> String {
    match error {
        ClientError::RefreshFailed(_) => "Сессия истекла. Войдите снова.".to_string(),
        ClientError::Request(_) => "Сервер недоступен. Проверьте соединение.".to_string(),
        ClientError::NotFound(_) => "Не найдено.".to_string(),
        ClientError::Forbidden(_) => "Недостаточно прав для этого действия.".to_string(),
        ClientError::BadRequest(message) => message.clone(),
        other => other.to_string(),
    }
}
