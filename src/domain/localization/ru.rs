use super::TextKey;

pub(super) fn text(key: TextKey) -> &'static str {
    match key {
        TextKey::ChooseLanguage => {
            "🕊️ Добро пожаловать! Welcome! ברוכים הבאים!\n\n\
             Пожалуйста, выберите язык / Please choose language / בחר שפה:"
        }
        TextKey::Greeting => {
            "Шалом! 🎉 Вы приглашены на Zoom-встречу с оргкомитетом для знакомства \
             с организаторами. На ней вы сможете выбрать миссию, которая вам по душе!"
        }
        TextKey::GreetingIndividual => {
            "Шалом! 🎉 Вы регистрируетесь как частное лицо. Приглашаем вас на \
             Zoom-встречу с оргкомитетом."
        }
        TextKey::GreetingOrganization => {
            "Шалом! 🎉 Вы регистрируете организацию. Приглашаем представителя \
             на Zoom-встречу с оргкомитетом."
        }
        TextKey::ChooseType => "👥 Вы участвуете как частное лицо или как организация?",
        TextKey::ChooseDate => "📅 Выберите удобную дату для Zoom-встречи:",
        TextKey::DateFull => {
            "❌ К сожалению, на эту дату все места заняты. Пожалуйста, выберите другую дату."
        }
        TextKey::DateNotOffered => "⚠️ Эта дата сейчас недоступна. Выберите дату из списка.",
        TextKey::MeetingConfirmed => {
            "Отлично! Мы будем очень рады видеть вас на нашей первой встрече!\n📅 {zoom_date}"
        }
        TextKey::IdAndCode => {
            "🎫 Ваш ID: №{participant_id}\n\
             📲 Уникальный код для активации ID: {activation_code}\n\n\
             ⚠️ Для активации вашего ID необходимо присутствовать на Zoom-встрече."
        }
        TextKey::CredentialLine => "🔳 Ваш пропуск: {credential}",
        TextKey::MainMenu => "📱 Главное меню:",
        TextKey::MenuSummary => {
            "Ваш ID: №{participant_id}\nВаш код активации: {activation_code}\nДата встречи: {zoom_date}"
        }
        TextKey::BtnRemindId => "📜 Напомнить номер ID",
        TextKey::BtnRemindCode => "🔑 Напомнить код активации",
        TextKey::BtnRemindDate => "📅 Напомнить дату встречи",
        TextKey::BtnReschedule => "🔄 Перенести встречу",
        TextKey::BtnHowToActivate => "❓ Как активировать ID?",
        TextKey::BtnInstruction => "📖 Инструкция",
        TextKey::BtnChangeLanguage => "🌍 Изменить язык",
        TextKey::BtnBackToMenu => "🔙 Меню",
        TextKey::BtnIndividual => "👤 Частное лицо",
        TextKey::BtnOrganization => "🏢 Организация",
        TextKey::YourId => "📜 Ваш ID: №{participant_id}",
        TextKey::YourCode => "🔑 Ваш код активации: {activation_code}",
        TextKey::YourDate => "📅 Ваша дата Zoom-встречи: {zoom_date}",
        TextKey::DateNotSet => "не указана",
        TextKey::HowToActivate => {
            "❓ Как активировать ID?\n\n\
             В день встречи вы получите ссылку и точное время. Во время встречи \
             отправьте свой уникальный код в общий чат.\n\n\
             По окончании встречи ваш ID будет активирован."
        }
        TextKey::Instruction => {
            "📖 ИНСТРУКЦИЯ ПО ZOOM\n\n\
             1. Откройте присланную ссылку на встречу.\n\
             2. Разрешите браузеру открыть Zoom или установите приложение.\n\
             3. При входе укажите ваше имя.\n\
             4. Проверьте микрофон и камеру.\n\
             5. Откройте «Чат» и отправьте ваш код в общий чат («Все»).\n\n\
             Подключайтесь за 5–10 минут до начала."
        }
        TextKey::NotRegistered => "Вы еще не зарегистрированы. Используйте /start для регистрации.",
        TextKey::LanguageChanged => "✅ Язык изменён на русский",
        TextKey::Unrecognized => "🤔 Не удалось распознать ответ. Попробуйте ещё раз.",
        TextKey::Help => {
            "📖 Справка\n\n\
             • СТАРТ - начать регистрацию\n\
             • РУССКИЙ / ENGLISH / עברית - выбрать язык\n\
             • МЕНЮ - главное меню\n\
             • ПОМОЩЬ - эта справка"
        }
        TextKey::TryAgainLater => "⏳ Сервис временно недоступен. Пожалуйста, повторите попытку позже.",
        TextKey::Full => "❌ FULL",
        TextKey::EmailSubject => "🕊️ Регистрация",
        TextKey::EmailReplyLanguage => {
            "Ответьте на это письмо одним словом или цифрой:\n1. РУССКИЙ\n2. ENGLISH\n3. עברית"
        }
        TextKey::EmailReplyType => {
            "Ответьте на это письмо цифрой:\n1. Частное лицо\n2. Организация"
        }
        TextKey::EmailReplyDate => "Ответьте на это письмо, указав номер желаемой даты:",
        TextKey::EmailReplyMenu => "Ответьте на это письмо с номером нужной команды:",
    }
}
