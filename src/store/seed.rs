//! Starter content: lesson chain, question banks and demo ranking profiles

use chrono::Utc;

use crate::domain::{
    ClassifiedItem, Lesson, Pair, Profile, QuestionBody, QuizQuestion, MAX_LIVES,
};

/// The initial Aymara lesson chain
pub fn starter_lessons() -> Vec<Lesson> {
    let specs = [
        ("Saludos Básicos", "Saludos y despedidas del altiplano", 1, 50, "hand", "blue"),
        ("Colores", "Los colores en aymara", 2, 50, "palette", "purple"),
        ("Animales", "Fauna del lago Titicaca", 3, 60, "bird", "green"),
        ("Números", "Contar del uno al diez", 4, 60, "hash", "yellow"),
    ];

    specs
        .iter()
        .map(|(title, description, order_index, xp_reward, icon, color)| Lesson {
            id: format!("lesson-{order_index}"),
            title: title.to_string(),
            description: description.to_string(),
            language: "aymara".to_string(),
            order_index: *order_index,
            xp_reward: *xp_reward,
            icon: icon.to_string(),
            color: color.to_string(),
            created_at: Utc::now(),
        })
        .collect()
}

/// Question bank for the first lesson (Saludos Básicos)
pub fn starter_questions(lessons: &[Lesson]) -> Vec<QuizQuestion> {
    let Some(saludos) = lessons.iter().find(|l| l.order_index == 1) else {
        return Vec::new();
    };

    let bodies = [
        (
            "¿Cómo se dice \"Hola\" en aymara?",
            QuestionBody::MultipleChoice {
                options: vec![
                    "Kamisaraki".into(),
                    "Waliki".into(),
                    "Jikisiñkama".into(),
                    "Aski urukipana".into(),
                ],
                answer: "Kamisaraki".into(),
            },
        ),
        (
            "Completa el saludo: \"______ urukipana\" (Buenos días)",
            QuestionBody::Completion {
                options: vec!["Aski".into(), "Waliki".into(), "Suma".into(), "Jach’a".into()],
                answer: "Aski".into(),
            },
        ),
        (
            "¿Qué significa \"Kamisaraki\"?",
            QuestionBody::MultipleChoice {
                options: vec![
                    "Buenas noches".into(),
                    "¿Cómo estás?".into(),
                    "Hasta luego".into(),
                    "Estoy bien".into(),
                ],
                answer: "¿Cómo estás?".into(),
            },
        ),
        (
            "\"Jikisiñkama\" se usa para despedirse.",
            QuestionBody::TrueFalse { answer: true },
        ),
        (
            "Escribe la palabra correcta para decir \"Estoy bien\":",
            QuestionBody::TextInput {
                answer: "Waliki".into(),
            },
        ),
        (
            "Une cada saludo con su significado:",
            QuestionBody::Matching {
                pairs: vec![
                    Pair::new("Kamisaraki", "¿Cómo estás?"),
                    Pair::new("Waliki", "Estoy bien"),
                    Pair::new("Jikisiñkama", "Hasta luego"),
                ],
            },
        ),
        (
            "Clasifica cada expresión como saludo o despedida:",
            QuestionBody::Classification {
                categories: vec!["Saludo".into(), "Despedida".into()],
                items: vec![
                    ClassifiedItem::new("Kamisaraki", "Saludo"),
                    ClassifiedItem::new("Aski urukipana", "Saludo"),
                    ClassifiedItem::new("Jikisiñkama", "Despedida"),
                    ClassifiedItem::new("Qharürkama", "Despedida"),
                ],
            },
        ),
    ];

    bodies
        .into_iter()
        .enumerate()
        .map(|(i, (prompt, body))| QuizQuestion {
            id: format!("saludos-{}", i + 1),
            lesson_id: Some(saludos.id.clone()),
            prompt: prompt.to_string(),
            body,
        })
        .collect()
}

/// Standalone cultural trivia used by the lives-recovery quiz
pub fn trivia_questions() -> Vec<QuizQuestion> {
    vec![
        QuizQuestion {
            id: "trivia-1".into(),
            lesson_id: None,
            prompt: "¿Qué danza emblemática de Puno representa la lucha entre el bien y el mal?"
                .into(),
            body: QuestionBody::MultipleChoice {
                options: vec![
                    "La Morenada".into(),
                    "La Diablada".into(),
                    "Los Caporales".into(),
                ],
                answer: "La Diablada".into(),
            },
        },
        QuizQuestion {
            id: "trivia-2".into(),
            lesson_id: None,
            prompt: "¿Qué isla del lago Titicaca es famosa por su arte textil declarado \
                     patrimonio por la UNESCO?"
                .into(),
            body: QuestionBody::MultipleChoice {
                options: vec![
                    "Isla Amantaní".into(),
                    "Isla del Sol".into(),
                    "Isla Taquile".into(),
                ],
                answer: "Isla Taquile".into(),
            },
        },
    ]
}

/// Demo profiles so the ranking has content before real users arrive
pub fn demo_profiles() -> Vec<Profile> {
    let specs = [
        ("demo-1", "AymaraMaster", 15_000, "Desaguadero", "Lima"),
        ("demo-2", "TiticacaExplorer", 12_500, "Juli", "Arequipa"),
        ("demo-3", "AndeanEagle", 9_800, "Ilave", "La Paz"),
        ("demo-4", "LlamaLover", 5_400, "Conima", "El Alto"),
        ("demo-5", "CocaLeaf", 2_100, "Yunguyo", "Tacna"),
        ("demo-6", "SuriRunner", 18_000, "Desaguadero", "Lima"),
        ("demo-7", "AlpacaKing", 11_000, "Chucuito", "Puno"),
        ("demo-8", "CondorWings", 7_500, "Juli", "Arequipa"),
    ];

    specs
        .iter()
        .map(|(id, username, xp, origin, residence)| Profile {
            id: id.to_string(),
            username: username.to_string(),
            xp: *xp,
            level: crate::domain::level_for_xp(*xp),
            lives: MAX_LIVES,
            growth_stage: 0,
            last_growth_visit: None,
            origin_city: Some(origin.to_string()),
            residence_city: Some(residence.to_string()),
            created_at: Utc::now(),
        })
        .collect()
}
