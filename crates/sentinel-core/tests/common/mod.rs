//! Scripted gateway shared by the integration tests.

#![allow(dead_code)]

use std::cell::RefCell;

use serde_json::Value;

use sentinel_gateway::{GatewayError, InferenceGateway, Operation, Result};
use sentinel_model::{
    ChatTurn, ConfusionMatrix, Feedback, FeedbackAck, ModelConfig, ModelMetrics, Prediction,
    SchemaAnalysis, Verdict,
};

/// Answers every operation from fixed values and records what it was asked.
#[derive(Debug, Default)]
pub struct StubGateway {
    pub fail: bool,
    pub empty_chat: bool,
    pub samples: RefCell<Vec<String>>,
    pub configs: RefCell<Vec<ModelConfig>>,
    pub transactions: RefCell<Vec<Value>>,
    pub chat_calls: RefCell<Vec<(String, Vec<ChatTurn>)>>,
}

impl StubGateway {
    pub fn failing() -> Self {
        Self {
            fail: true,
            ..Self::default()
        }
    }

    fn check(&self, operation: Operation) -> Result<()> {
        if self.fail {
            Err(GatewayError::ProtocolViolation {
                operation,
                reason: "scripted failure".to_string(),
            })
        } else {
            Ok(())
        }
    }
}

pub fn analysis() -> SchemaAnalysis {
    SchemaAnalysis {
        features: vec!["V1".into(), "V2".into(), "Amount".into()],
        target_variable: "Class".into(),
        data_issues: vec!["Class imbalance".into()],
        summary: "Card transactions.".into(),
    }
}

pub fn metrics() -> ModelMetrics {
    ModelMetrics {
        accuracy: 0.9991,
        precision: 0.9,
        recall: 0.8,
        f1_score: 0.847,
        auc: 0.972,
        confusion_matrix: ConfusionMatrix {
            true_positives: 80.0,
            false_positives: 9.0,
            true_negatives: 99891.0,
            false_negatives: 20.0,
        },
    }
}

impl InferenceGateway for StubGateway {
    fn analyze_schema(&self, sample: &str) -> Result<SchemaAnalysis> {
        self.check(Operation::AnalyzeSchema)?;
        self.samples.borrow_mut().push(sample.to_string());
        Ok(analysis())
    }

    fn simulate_training(
        &self,
        config: &ModelConfig,
        _analysis: &SchemaAnalysis,
    ) -> Result<ModelMetrics> {
        self.check(Operation::SimulateTraining)?;
        self.configs.borrow_mut().push(config.clone());
        Ok(metrics())
    }

    fn predict_one(&self, transaction: &Value, _metrics: &ModelMetrics) -> Result<Prediction> {
        self.check(Operation::PredictOne)?;
        self.transactions.borrow_mut().push(transaction.clone());
        Ok(Prediction {
            prediction: Verdict::Fraud,
            probability: 0.91,
            reasoning: "Unusually large amount.".into(),
        })
    }

    fn converse(&self, message: &str, history: &[ChatTurn]) -> Result<String> {
        self.chat_calls
            .borrow_mut()
            .push((message.to_string(), history.to_vec()));
        self.check(Operation::Converse)?;
        if self.empty_chat {
            Ok(String::new())
        } else {
            Ok(format!("You said: {message}"))
        }
    }

    fn acknowledge_feedback(&self, feedback: &Feedback) -> Result<FeedbackAck> {
        self.check(Operation::AcknowledgeFeedback)?;
        Ok(FeedbackAck {
            acknowledgment: format!("Thanks for the {} feedback!", feedback.category),
        })
    }
}
