//! Prompt text for each operation.

use serde_json::Value;

use sentinel_model::{Feedback, ModelConfig, ModelMetrics, SchemaAnalysis};

/// Fixed system instruction for the chat assistant.
pub const ASSISTANT_INSTRUCTION: &str = "You are Sentinel AI, an assistant built into a \
fraud detection training wizard. Help users move through its stages: uploading a \
transaction CSV, preprocessing, training a model, reading the evaluation metrics, and \
testing the deployed endpoint. Answer briefly and concretely. Write plain text without \
markdown emphasis.";

pub fn analyze_schema(sample: &str) -> String {
    format!(
        "You are reviewing the first lines of a credit card transaction dataset.\n\
         Identify the feature columns, the target variable that marks fraud, any data \
         quality issues (missing values, class imbalance, scaling), and summarize the \
         dataset in two sentences.\n\nSample:\n{sample}"
    )
}

pub fn simulate_training(config: &ModelConfig, analysis: &SchemaAnalysis) -> String {
    let epochs = config
        .epochs
        .map_or_else(|| "not set".to_string(), |epochs| epochs.to_string());
    format!(
        "Simulate training a {algorithm} fraud classifier and report realistic evaluation \
         metrics for a highly imbalanced dataset.\n\
         Test split: {test_size}\nLearning rate: {learning_rate}\nEpochs: {epochs}\n\
         Target variable: {target}\nFeatures: {features}\n\
         Keep the confusion matrix consistent with precision, recall and accuracy.",
        algorithm = config.algorithm.description(),
        test_size = config.test_size,
        learning_rate = config.learning_rate,
        target = analysis.target_variable,
        features = analysis.features.join(", "),
    )
}

pub fn predict_one(transaction: &Value, metrics: &ModelMetrics) -> String {
    format!(
        "Act as a deployed fraud detection model with AUC {auc:.3}. Classify the \
         transaction below as Fraud or Legitimate, give the fraud probability between \
         0 and 1, and explain the decision in one or two sentences.\n\nTransaction:\n{transaction}",
        auc = metrics.auc,
    )
}

pub fn acknowledge_feedback(feedback: &Feedback) -> String {
    format!(
        "A user submitted {category} feedback about a fraud detection training tool:\n\
         \"{message}\"\n\
         Write a short, friendly acknowledgment that reflects what they said.",
        category = feedback.category,
        message = feedback.message,
    )
}
