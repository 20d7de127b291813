//! # Menu Catalog
//!
//! Static data shown by the bot: the privilege price list, the exact menu
//! button labels the router matches against, and the staff-role
//! questionnaire templates.

/// Suffix carried by every purchase-selection callback identifier
pub const PURCHASE_CALLBACK_SUFFIX: &str = "_buy";

/// Main menu button labels (matched exactly, case-sensitive)
pub const BUY_PRIVILEGE_LABEL: &str = "Приобрести привилегию";
pub const WRITE_IDEA_LABEL: &str = "Написать идею";
pub const WRITE_COMPLAINT_LABEL: &str = "Написать жалобу";
pub const SUBMIT_APPLICATION_LABEL: &str = "Подать заявку";

/// Cancel button shown while choosing a role
pub const CANCEL_LABEL: &str = "Отмена";

/// Main menu layout, one button per row
pub const MAIN_MENU_LABELS: [&str; 4] = [
    BUY_PRIVILEGE_LABEL,
    WRITE_IDEA_LABEL,
    SUBMIT_APPLICATION_LABEL,
    WRITE_COMPLAINT_LABEL,
];

/// A purchasable privilege tier
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PrivilegeEntry {
    /// Inline button callback identifier
    pub id: &'static str,
    /// Display label (name and price)
    pub label: &'static str,
}

pub const PRIVILEGES: [PrivilegeEntry; 7] = [
    PrivilegeEntry { id: "start_buy", label: "START - 15 UAH" },
    PrivilegeEntry { id: "top_buy", label: "TOP - 30 UAH" },
    PrivilegeEntry { id: "lord_buy", label: "LORD - 45 UAH" },
    PrivilegeEntry { id: "giperlord_buy", label: "GIPERLORD - 75 UAH" },
    PrivilegeEntry { id: "master_buy", label: "MASTER - 95 UAH" },
    PrivilegeEntry { id: "legend_buy", label: "LEGEND - 110 UAH" },
    PrivilegeEntry { id: "wirher_buy", label: "WIRHER - 150 UAH" },
];

/// Look up a privilege by its callback identifier
pub fn find_privilege(id: &str) -> Option<&'static PrivilegeEntry> {
    PRIVILEGES.iter().find(|entry| entry.id == id)
}

/// Staff roles a user can apply for
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Role {
    YouTube,
    TikTok,
    Helper,
}

impl Role {
    /// Role keyboard order
    pub const ALL: [Role; 3] = [Role::YouTube, Role::Helper, Role::TikTok];

    /// Button label, also used in the message type
    pub fn label(self) -> &'static str {
        match self {
            Role::YouTube => "YouTube",
            Role::TikTok => "TikTok",
            Role::Helper => "Helper",
        }
    }

    /// Parse an exact button label
    pub fn from_label(text: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|role| role.label() == text)
    }

    /// Questionnaire the applicant copies, fills in and sends back
    pub fn template(self) -> &'static str {
        match self {
            Role::YouTube => YOUTUBE_TEMPLATE,
            Role::TikTok => TIKTOK_TEMPLATE,
            Role::Helper => HELPER_TEMPLATE,
        }
    }
}

pub const YOUTUBE_TEMPLATE: &str = "<b>ЗАЯВКА НА ДОЛЖНОСТЬ YOUTUBE</b>
Заполните анкету и ответьте на все вопросы, скопируйте и отправьте ее боту:

1) Имя:
2) Ваш возраст:
3) Ваш игровой ник:
4) Количество отыгранных часов на сервере:
5) Ваш Дискорд:
6) Кол-во подписчиков:
7) Сколько часов в день Вы готовы уделять нашему проекту?
8) Расскажите про свой канал, как Вы его ведете?
9) Ссылка на Ваш канал:
10) Оценка Ваших видео (качество видео) от 1 до 10:
";

pub const TIKTOK_TEMPLATE: &str = "<b>ЗАЯВКА НА ДОЛЖНОСТЬ TIKTOK</b>
Заполните анкету и ответьте на все вопросы, скопируйте и отправьте ее боту:

1) Имя:
2) Ваш возраст:
3) Ваш игровой ник:
4) Количество отыгранных часов на сервере:
5) Ваш Дискорд:
6) Кол-во подписчиков:
7) Сколько часов в день готовы уделять нашему проекту?
8) Как Вы видите себя на посту?
9) Расскажите о своем канале:
";

pub const HELPER_TEMPLATE: &str = "<b>ЗАЯВКА НА ДОЛЖНОСТЬ HELPER</b>
Заполните анкету и ответьте на все вопросы, скопируйте и отправьте ее боту:

1) Имя:
2) Ваш возраст:
3) Ваш игровой ник:
4) Количество отыгранных часов на сервере:
5) Ваш Дискорд:
6) Есть ли у Вас опыт работы? Если да, то какой, на каком сервере?:
7) Сколько часов в день готовы уделять нашему проекту?:
8) Почему вы хотите занять этот пост? (Постарайтесь дать как можно более подробный ответ):
9) Напишите о себе:
10) Как вы понимаете понятия слов: Адекватность, рассудок?:
";
