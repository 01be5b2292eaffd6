//! Prompt templates for answering from the knowledge document

/// Templates shared by every provider adapter
pub struct AnswerPromptTemplate;

impl AnswerPromptTemplate {
    /// Exact payload the model must emit when the document has no answer.
    pub const NOT_FOUND_PAYLOAD: &'static str = r#"{"type":"text","answer":"I couldn't find information about that in the knowledge document.","follow_up":null,"source_section_id":null,"source_section_title":null}"#;

    /// System instruction constraining the model to the document and to the
    /// three response shapes.
    pub fn system(document_excerpt: &str) -> String {
        format!(
            r#"You are an assistant that answers questions about a single reference document.

Rules:
1. Answer EXCLUSIVELY from the document below. Do not use outside knowledge.
2. Respond with ONLY one JSON object. No markdown, no code fences, no text before or after it.
3. The JSON object must have one of these shapes:

   Prose answer:
   {{"type":"text","answer":"...","follow_up":"..." or null,"source_section_id":"..." or null,"source_section_title":"..." or null}}

   Enumerated answer (steps, lists, comparisons):
   {{"type":"list","title":"...","items":[{{"point":"...","detail":"..."}}],"follow_up":"..." or null,"source_section_id":"..." or null,"source_section_title":"..." or null}}

   Unanswerable request (abusive, unrelated to the document's subject):
   {{"type":"error","message":"..."}}

4. When the answer comes from a specific section, set source_section_id and source_section_title exactly as they appear in the document.
5. follow_up, when present, is one short question the user might ask next.
6. If the document does not contain the answer, respond with exactly:
{not_found}

<document>
{document}
</document>"#,
            not_found = Self::NOT_FOUND_PAYLOAD,
            document = document_excerpt,
        )
    }

    /// User message carrying the question
    pub fn user(question: &str) -> String {
        format!("Question: {}", question)
    }
}
