use super::TextKey;

pub(super) fn text(key: TextKey) -> &'static str {
    match key {
        TextKey::ChooseLanguage => {
            "🕊️ Welcome! Добро пожаловать! ברוכים הבאים!\n\n\
             Please choose language / Выберите язык / בחר שפה:"
        }
        TextKey::Greeting => {
            "Shalom! 🎉 You are invited to a Zoom meeting with the organizing committee. \
             There you will be able to choose the mission that suits you best!"
        }
        TextKey::GreetingIndividual => {
            "Shalom! 🎉 You are registering as an individual. Join us at a Zoom \
             meeting with the organizing committee."
        }
        TextKey::GreetingOrganization => {
            "Shalom! 🎉 You are registering an organization. We invite a representative \
             to a Zoom meeting with the organizing committee."
        }
        TextKey::ChooseType => "👥 Are you joining as an individual or as an organization?",
        TextKey::ChooseDate => "📅 Choose a convenient date for the Zoom meeting:",
        TextKey::DateFull => {
            "❌ Unfortunately, all spots are filled for this date. Please choose another date."
        }
        TextKey::DateNotOffered => "⚠️ That date is not available. Please pick one from the list.",
        TextKey::MeetingConfirmed => {
            "Excellent! We will be very happy to see you at our first meeting!\n📅 {zoom_date}"
        }
        TextKey::IdAndCode => {
            "🎫 Your ID: №{participant_id}\n\
             📲 Unique activation code: {activation_code}\n\n\
             ⚠️ To activate your ID, you must attend the Zoom meeting."
        }
        TextKey::CredentialLine => "🔳 Your pass: {credential}",
        TextKey::MainMenu => "📱 Main menu:",
        TextKey::MenuSummary => {
            "Your ID: №{participant_id}\nYour activation code: {activation_code}\nMeeting date: {zoom_date}"
        }
        TextKey::BtnRemindId => "📜 Remind my ID",
        TextKey::BtnRemindCode => "🔑 Remind activation code",
        TextKey::BtnRemindDate => "📅 Remind meeting date",
        TextKey::BtnReschedule => "🔄 Reschedule meeting",
        TextKey::BtnHowToActivate => "❓ How to activate ID?",
        TextKey::BtnInstruction => "📖 Instruction",
        TextKey::BtnChangeLanguage => "🌍 Change language",
        TextKey::BtnBackToMenu => "🔙 Menu",
        TextKey::BtnIndividual => "👤 Individual",
        TextKey::BtnOrganization => "🏢 Organization",
        TextKey::YourId => "📜 Your ID: №{participant_id}",
        TextKey::YourCode => "🔑 Your activation code: {activation_code}",
        TextKey::YourDate => "📅 Your Zoom meeting date: {zoom_date}",
        TextKey::DateNotSet => "not set",
        TextKey::HowToActivate => {
            "❓ How to activate ID?\n\n\
             On the day of the meeting you will receive a link and the exact time. \
             During the meeting, send your unique code to the general chat.\n\n\
             After the meeting ends, your ID will be activated."
        }
        TextKey::Instruction => {
            "📖 ZOOM INSTRUCTION\n\n\
             1. Open the meeting link you received.\n\
             2. Allow the browser to open Zoom or install the app.\n\
             3. Enter your name when joining.\n\
             4. Check your microphone and camera.\n\
             5. Open «Chat» and send your code to the general chat («All»).\n\n\
             Connect 5–10 minutes before the start."
        }
        TextKey::NotRegistered => "You are not registered yet. Use /start to register.",
        TextKey::LanguageChanged => "✅ Language changed to English",
        TextKey::Unrecognized => "🤔 Sorry, I did not understand that. Please try again.",
        TextKey::Help => {
            "📖 Help\n\n\
             • START - begin registration\n\
             • RUSSIAN / ENGLISH / HEBREW - choose language\n\
             • MENU - main menu\n\
             • HELP - this help"
        }
        TextKey::TryAgainLater => "⏳ The service is temporarily unavailable. Please try again later.",
        TextKey::Full => "❌ FULL",
        TextKey::EmailSubject => "🕊️ Registration",
        TextKey::EmailReplyLanguage => {
            "Reply to this email with one word or number:\n1. RUSSIAN\n2. ENGLISH\n3. HEBREW"
        }
        TextKey::EmailReplyType => {
            "Reply to this email with a number:\n1. Individual\n2. Organization"
        }
        TextKey::EmailReplyDate => "Reply to this email with the number of your preferred date:",
        TextKey::EmailReplyMenu => "Reply to this email with the number of the command you need:",
    }
}
