//! UI strings in Traditional Chinese and English.
//!
//! The core never produces user-facing text. Feedback is kept as a
//! [`Feedback`] value and turned into a string at render time, so switching
//! language re-renders whatever is currently shown.

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Lang {
    Zh,
    En,
}

impl Lang {
    pub fn toggled(self) -> Self {
        match self {
            Lang::Zh => Lang::En,
            Lang::En => Lang::Zh,
        }
    }
}

/// Message under the answer line.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Feedback {
    None,
    Correct,
    Wrong { answer: i32 },
    InvalidInput,
    ResetPending,
    ResetDone,
    Celebration,
    Revealed { answer: i32 },
    ShowAnswerEnabled,
    ShowAnswerDisabled,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Tone {
    Neutral,
    Good,
    Bad,
}

impl Feedback {
    pub fn tone(self) -> Tone {
        match self {
            Feedback::None | Feedback::ShowAnswerEnabled | Feedback::ShowAnswerDisabled => {
                Tone::Neutral
            }
            Feedback::Correct
            | Feedback::ResetDone
            | Feedback::Celebration
            | Feedback::Revealed { .. } => Tone::Good,
            Feedback::Wrong { .. } | Feedback::InvalidInput | Feedback::ResetPending => Tone::Bad,
        }
    }

    pub fn text(self, lang: Lang) -> String {
        match (self, lang) {
            (Feedback::None, _) => String::new(),
            (Feedback::Correct, Lang::Zh) => "正確! +10分".into(),
            (Feedback::Correct, Lang::En) => "Correct! +10 points".into(),
            (Feedback::Wrong { answer }, Lang::Zh) => format!("錯誤! 正確答案: {answer}"),
            (Feedback::Wrong { answer }, Lang::En) => format!("Wrong! Correct answer: {answer}"),
            (Feedback::InvalidInput, Lang::Zh) => "請輸入數字".into(),
            (Feedback::InvalidInput, Lang::En) => "Please enter a number".into(),
            (Feedback::ResetPending, Lang::Zh) => "再次點擊確認重置".into(),
            (Feedback::ResetPending, Lang::En) => "Click again to confirm reset".into(),
            (Feedback::ResetDone, Lang::Zh) => "已重置進度!".into(),
            (Feedback::ResetDone, Lang::En) => "Progress reset!".into(),
            (Feedback::Celebration, Lang::Zh) => "🎉 目標完成! 150分!".into(),
            (Feedback::Celebration, Lang::En) => "🎉 Mission Complete! 150 Points!".into(),
            (Feedback::Revealed { answer }, Lang::Zh) => format!("正確答案是: {answer}"),
            (Feedback::Revealed { answer }, Lang::En) => format!("Correct answer: {answer}"),
            (Feedback::ShowAnswerEnabled, Lang::Zh) => "已開啟答案顯示功能".into(),
            (Feedback::ShowAnswerEnabled, Lang::En) => "Answer display enabled".into(),
            (Feedback::ShowAnswerDisabled, Lang::Zh) => "已禁用答案顯示功能".into(),
            (Feedback::ShowAnswerDisabled, Lang::En) => "Answer display disabled".into(),
        }
    }
}

/// Fixed labels for one language.
pub struct Texts {
    pub title: &'static str,
    pub score: &'static str,
    pub correct: &'static str,
    pub answer: &'static str,
    pub placeholder: &'static str,
    pub submit: &'static str,
    pub show_answer: &'static str,
    pub report: &'static str,
    pub reset: &'static str,
    /// Label of the language toggle: names the language it switches to.
    pub switch_lang: &'static str,
    pub report_title: &'static str,
    pub total: &'static str,
    pub accuracy: &'static str,
    pub time: &'static str,
    pub close: &'static str,
}

const ZH: Texts = Texts {
    title: "百分比變化練習",
    score: "分數",
    correct: "答對",
    answer: "答案",
    placeholder: "輸入答案 (例: -20)",
    submit: "提交",
    show_answer: "顯示答案",
    report: "成績單",
    reset: "重置",
    switch_lang: "English",
    report_title: "成績單",
    total: "總題數",
    accuracy: "正確率",
    time: "時間",
    close: "關閉",
};

const EN: Texts = Texts {
    title: "Percentage Change Drill",
    score: "Score",
    correct: "Correct",
    answer: "Answer",
    placeholder: "Enter answer (e.g. -20)",
    submit: "Submit",
    show_answer: "Show Answer",
    report: "Report",
    reset: "Reset",
    switch_lang: "中文",
    report_title: "Report Card",
    total: "Total",
    accuracy: "Accuracy",
    time: "Time",
    close: "Close",
};

pub fn texts(lang: Lang) -> &'static Texts {
    match lang {
        Lang::Zh => &ZH,
        Lang::En => &EN,
    }
}
