use super::word::GeneratorRequest;
use super::{AdapterKind, Protocol};
use crate::ai::fallback::{trivia_questions, MovePicker};
use crate::ai::parser;
use crate::ai::types::{Answer, Message, Tuning};
use crate::ai::validate::{self, AnswerError, TRIVIA_BATCH_SIZE};
use crate::errors::GatewayError;

pub struct TriviaGenerator;

impl Protocol for TriviaGenerator {
    type Request = GeneratorRequest;

    const KIND: AdapterKind = AdapterKind::TriviaGenerator;
    const TUNING: Tuning = Tuning::creative(512);

    fn build_prompt(req: &GeneratorRequest) -> Vec<Message> {
        let user = format!(
            "{}\n\nDifficulty: {}.\nWrite exactly {TRIVIA_BATCH_SIZE} kid-friendly multiple choice \
             questions. Respond only with JSON of the form \
             {{\"questions\": [{{\"question\": \"...\", \"options\": [\"A\", \"B\", \"C\", \"D\"], \
             \"correct\": 0}}]}} where options has exactly 4 entries and correct is the index (0-3) \
             of the right option.",
            req.instruction("Create a general knowledge trivia round."),
            req.difficulty,
        );
        vec![Message::system(req.system_prompt.clone()), Message::user(user)]
    }

    fn parse_and_validate(raw: &str, _req: &GeneratorRequest) -> Result<Answer, AnswerError> {
        let value = parser::parse_json(raw)?;
        validate::trivia_batch(value).map(Answer::Questions)
    }

    fn fallback(_req: &GeneratorRequest, _picker: &MovePicker) -> Result<Answer, GatewayError> {
        Ok(Answer::Questions(trivia_questions()))
    }
}
