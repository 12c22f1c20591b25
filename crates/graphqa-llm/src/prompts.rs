//! Prompt templates.

/// Prompt asking for a Cypher query (or none) for `question`.
pub fn text2cypher(grounding: &str, question: &str) -> String {
    format!(
        r#"You translate questions into Cypher queries for a Neo4j graph database.

Rules:
- Use only the node labels, relationship types, and properties listed in the schema.
- Follow every relationship in the direction shown in the schema.
- Return only the properties needed to answer the question, each with a readable alias.
- Match free-text names and titles with case-insensitive CONTAINS.
- Do not write to the graph.
- If the question cannot be answered from this schema, return null.

SCHEMA:
{grounding}

QUESTION: {question}

Respond with JSON only: {{"query": "<cypher>"}} or {{"query": null}}"#
    )
}

/// Prompt asking for a natural-language answer from serialized results.
pub fn answer_question(question: &str, result_text: &str) -> String {
    format!(
        r#"You answer questions using only the results of a graph database query.

QUESTION: {question}

QUERY RESULTS:
{result_text}

Answer in plain language using only the results above. If the results are empty,
say that the graph holds no information to answer the question. Do not mention
Cypher, queries, or the database."#
    )
}

/// Rubric prompt for the judge.
pub fn judge(question: &str, reference: &str, produced: &str) -> String {
    format!(
        r#"You are evaluating a RAG system's answer against a baseline (expected) answer.

Score the system's answer on a scale of 1-5:
1 = no_answer: The system returned nothing useful or said it doesn't know
2 = wrong: The answer is factually incorrect or completely off-topic
3 = partial: The answer addresses the question but is missing key information from the baseline
4 = acceptable: The answer is mostly correct and useful, minor gaps acceptable
5 = correct: The answer is accurate and covers the key points in the baseline

QUESTION: {question}

BASELINE ANSWER: {reference}

SYSTEM ANSWER: {produced}

Respond with JSON only: {{"score": <1-5>, "reasoning": "<one sentence>"}}"#
    )
}
