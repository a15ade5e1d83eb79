//! End-to-end quiz session: scoring, life deductions and persistence

use std::collections::BTreeMap;

use yatina::engine::{apply_effects, Advanced, AnswerInput, Phase, QuizSession};
use yatina::store::{ProgressStore, QuestionFilter, SqliteStore};
use yatina::{ClassifiedItem, Pair, Profile, QuestionBody, QuizQuestion};

fn bank() -> Vec<QuizQuestion> {
    vec![
        QuizQuestion {
            id: "q1".into(),
            lesson_id: Some("lesson-1".into()),
            prompt: "¿Cómo se dice \"Hola\" en aymara?".into(),
            body: QuestionBody::MultipleChoice {
                options: vec!["Kamisaraki".into(), "Waliki".into()],
                answer: "Kamisaraki".into(),
            },
        },
        QuizQuestion {
            id: "q2".into(),
            lesson_id: Some("lesson-1".into()),
            prompt: "\"Jikisiñkama\" se usa para despedirse.".into(),
            body: QuestionBody::TrueFalse { answer: true },
        },
        QuizQuestion {
            id: "q3".into(),
            lesson_id: Some("lesson-1".into()),
            prompt: "Escribe \"Estoy bien\":".into(),
            body: QuestionBody::TextInput {
                answer: "Waliki".into(),
            },
        },
        QuizQuestion {
            id: "q4".into(),
            lesson_id: Some("lesson-1".into()),
            prompt: "Une cada saludo con su significado:".into(),
            body: QuestionBody::Matching {
                pairs: vec![
                    Pair::new("Kamisaraki", "¿Cómo estás?"),
                    Pair::new("Waliki", "Estoy bien"),
                ],
            },
        },
        QuizQuestion {
            id: "q5".into(),
            lesson_id: Some("lesson-1".into()),
            prompt: "Clasifica cada expresión:".into(),
            body: QuestionBody::Classification {
                categories: vec!["Saludo".into(), "Despedida".into()],
                items: vec![
                    ClassifiedItem::new("Kamisaraki", "Saludo"),
                    ClassifiedItem::new("Jikisiñkama", "Despedida"),
                ],
            },
        },
    ]
}

/// 5 questions, 3 answered correctly and 2 incorrectly with 3 lives:
/// final lives 1, completion percentage 60%.
#[tokio::test]
async fn session_with_three_correct_of_five_ends_at_sixty_percent() {
    let store = SqliteStore::open_in_memory().unwrap();
    let mut profile = Profile::new("amaru");
    profile.lives = 3;
    store.create_profile(&profile).await.unwrap();

    let mut session = QuizSession::new(&profile.id, bank(), profile.lives).unwrap();

    let answers = [
        AnswerInput::Choice("Kamisaraki".into()), // correct
        AnswerInput::Bool(false),                 // wrong
        AnswerInput::Text("waliki".into()),       // correct (case-folded)
        AnswerInput::Connections(vec![Pair::new("Kamisaraki", "Estoy bien")]), // wrong
        AnswerInput::Assignments(BTreeMap::from([
            ("Kamisaraki".to_string(), "Saludo".to_string()),
            ("Jikisiñkama".to_string(), "Despedida".to_string()),
        ])), // correct
    ];

    let mut last = None;
    for answer in answers {
        session.submit_answer(answer).unwrap();
        let result = session.check_answer().unwrap();
        apply_effects(&store, &result.effects).await.unwrap();
        last = Some(session.advance().unwrap());
    }

    let Some(Advanced::Completed(summary)) = last else {
        panic!("session should be complete");
    };
    assert_eq!(summary.score, 3);
    assert_eq!(summary.total, 5);
    assert_eq!(summary.percentage, 60);
    assert_eq!(session.phase(), Phase::Completed);
    assert_eq!(session.lives(), 1);

    // Persisted lives follow the emitted effects
    let stored = store.get_profile(&profile.id).await.unwrap();
    assert_eq!(stored.lives, 1);
}

#[tokio::test]
async fn seeded_question_bank_loads_and_plays() {
    let store = SqliteStore::open_in_memory().unwrap();
    store.seed_defaults().unwrap();

    let lessons = store.list_lessons().await.unwrap();
    let saludos = lessons.iter().find(|l| l.order_index == 1).unwrap();
    let questions = store
        .list_questions(&QuestionFilter {
            lesson_id: Some(saludos.id.clone()),
            limit: None,
        })
        .await
        .unwrap();
    assert!(questions.len() >= 5);

    let profile = Profile::new("amaru");
    store.create_profile(&profile).await.unwrap();
    let mut session = QuizSession::new(&profile.id, questions, profile.lives).unwrap();
    assert!(session.current_question().is_some());

    // First seeded question: "Kamisaraki" is the greeting
    session
        .submit_answer(AnswerInput::Choice("Kamisaraki".into()))
        .unwrap();
    assert!(session.check_answer().unwrap().correct);
}

#[tokio::test]
async fn recovery_trivia_restores_persisted_lives() {
    let store = SqliteStore::open_in_memory().unwrap();
    store.seed_defaults().unwrap();

    let mut profile = Profile::new("amaru");
    profile.lives = 2;
    store.create_profile(&profile).await.unwrap();

    let trivia = store
        .list_questions(&QuestionFilter::default())
        .await
        .unwrap();
    assert_eq!(trivia.len(), 2);

    let mut session = QuizSession::recovery(&profile.id, trivia, profile.lives).unwrap();
    session
        .submit_answer(AnswerInput::Choice("La Diablada".into()))
        .unwrap();
    let result = session.check_answer().unwrap();
    assert!(result.correct);
    apply_effects(&store, &result.effects).await.unwrap();

    let stored = store.get_profile(&profile.id).await.unwrap();
    assert_eq!(stored.lives, 3);
    assert_eq!(session.summary().lives_recovered, 1);
}
