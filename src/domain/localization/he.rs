use super::TextKey;

pub(super) fn text(key: TextKey) -> &'static str {
    match key {
        TextKey::ChooseLanguage => {
            "🕊️ ברוכים הבאים! Welcome! Добро пожаловать!\n\n\
             בחר שפה / Choose language / Выберите язык:"
        }
        TextKey::Greeting => {
            "שלום! 🎉 אתה מוזמן לפגישת Zoom עם הוועדה המארגנת. \
             בפגישה תוכל לבחור את המשימה המתאימה לך ביותר!"
        }
        TextKey::GreetingIndividual => {
            "שלום! 🎉 אתה נרשם כאדם פרטי. אנו מזמינים אותך לפגישת Zoom עם הוועדה המארגנת."
        }
        TextKey::GreetingOrganization => {
            "שלום! 🎉 אתה רושם ארגון. אנו מזמינים נציג לפגישת Zoom עם הוועדה המארגנת."
        }
        TextKey::ChooseType => "👥 האם אתה משתתף כאדם פרטי או כארגון?",
        TextKey::ChooseDate => "📅 בחר תאריך נוח לפגישת Zoom:",
        TextKey::DateFull => "❌ למרבה הצער, כל המקומות תפוסים לתאריך זה. אנא בחר תאריך אחר.",
        TextKey::DateNotOffered => "⚠️ התאריך הזה אינו זמין. אנא בחר תאריך מהרשימה.",
        TextKey::MeetingConfirmed => "מצוין! נשמח מאוד לראות אותך בפגישה הראשונה שלנו!\n📅 {zoom_date}",
        TextKey::IdAndCode => {
            "🎫 ה-ID שלך: №{participant_id}\n\
             📲 קוד הפעלה ייחודי: {activation_code}\n\n\
             ⚠️ להפעלת ה-ID שלך, עליך להשתתף בפגישת Zoom."
        }
        TextKey::CredentialLine => "🔳 הכרטיס שלך: {credential}",
        TextKey::MainMenu => "📱 תפריט ראשי:",
        TextKey::MenuSummary => {
            "ה-ID שלך: №{participant_id}\nקוד ההפעלה שלך: {activation_code}\nתאריך הפגישה: {zoom_date}"
        }
        TextKey::BtnRemindId => "📜 להזכיר את ה-ID",
        TextKey::BtnRemindCode => "🔑 להזכיר קוד הפעלה",
        TextKey::BtnRemindDate => "📅 להזכיר תאריך פגישה",
        TextKey::BtnReschedule => "🔄 לשנות תאריך פגישה",
        TextKey::BtnHowToActivate => "❓ איך להפעיל ID?",
        TextKey::BtnInstruction => "📖 הוראות",
        TextKey::BtnChangeLanguage => "🌍 לשנות שפה",
        TextKey::BtnBackToMenu => "🔙 תפריט",
        TextKey::BtnIndividual => "👤 אדם פרטי",
        TextKey::BtnOrganization => "🏢 ארגון",
        TextKey::YourId => "📜 ה-ID שלך: №{participant_id}",
        TextKey::YourCode => "🔑 קוד ההפעלה שלך: {activation_code}",
        TextKey::YourDate => "📅 תאריך פגישת Zoom שלך: {zoom_date}",
        TextKey::DateNotSet => "לא נקבע",
        TextKey::HowToActivate => {
            "❓ איך להפעיל ID?\n\n\
             ביום הפגישה תקבל קישור ואת השעה המדויקת. במהלך הפגישה שלח את \
             הקוד הייחודי שלך לצ'אט הכללי.\n\n\
             בסיום הפגישה ה-ID שלך יופעל."
        }
        TextKey::Instruction => {
            "📖 הוראות ZOOM\n\n\
             1. פתח את הקישור שנשלח לפגישה.\n\
             2. אפשר לדפדפן לפתוח את Zoom או התקן את האפליקציה.\n\
             3. בכניסה הזן את שמך.\n\
             4. בדוק מיקרופון ומצלמה.\n\
             5. פתח את «צ'אט» ושלח את הקוד שלך לצ'אט הכללי («כולם»).\n\n\
             התחבר 5–10 דקות לפני ההתחלה."
        }
        TextKey::NotRegistered => "אתה עדיין לא רשום. השתמש ב-/start כדי להירשם.",
        TextKey::LanguageChanged => "✅ השפה שונתה לעברית",
        TextKey::Unrecognized => "🤔 לא הבנתי את התשובה. אנא נסה שוב.",
        TextKey::Help => {
            "📖 עזרה\n\n\
             • START - התחל רישום\n\
             • RUSSIAN / ENGLISH / HEBREW - בחר שפה\n\
             • MENU - תפריט ראשי\n\
             • HELP - עזרה זו"
        }
        TextKey::TryAgainLater => "⏳ השירות אינו זמין כרגע. אנא נסה שוב מאוחר יותר.",
        TextKey::Full => "❌ FULL",
        TextKey::EmailSubject => "🕊️ הרשמה",
        TextKey::EmailReplyLanguage => {
            "השב למייל זה במילה אחת או במספר:\n1. RUSSIAN\n2. ENGLISH\n3. עברית"
        }
        TextKey::EmailReplyType => "השב למייל זה במספר:\n1. אדם פרטי\n2. ארגון",
        TextKey::EmailReplyDate => "השב למייל זה עם מספר התאריך המועדף:",
        TextKey::EmailReplyMenu => "השב למייל זה עם מספר הפקודה הנדרשת:",
    }
}
