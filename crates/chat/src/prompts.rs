//! Prompt templates and fixed strings for the conversational chain.

/// The exact refusal the answering stage returns when the retrieved context
/// cannot support an answer. The router is instructed to relay it verbatim.
pub const REFUSAL: &str =
    "I don't have enough information in the provided documents to answer that question.";

/// Instruction appended after the conversation when asking the model to
/// produce a standalone search query.
pub const REPHRASE_PROMPT: &str = "\
Given the above conversation, generate a concise search query to look up in order to get \
information relevant to the conversation. Only return the search query and nothing else.";

/// Name of the document-QA capability as the routing model sees it.
pub const DOC_QA_TOOL: &str = "answer_questions_from_documents";

/// System prompt for the routing model.
pub const ROUTER_SYSTEM_PROMPT: &str = "\
You are an assistant that answers questions from a private document knowledge base.

Your available tools:
1. `answer_questions_from_documents`: Use this for any informational question. This should be \
your default action for informational queries.
2. `save_conversation`: Use this only when the user explicitly asks to save, export, or write \
down the current conversation to a file.
3. `get_current_time`: Use this only when the user explicitly asks for the current time or date.

Critical rules of engagement:
- Your first priority is always to use `answer_questions_from_documents` to answer questions.
- The output of `answer_questions_from_documents` is the final authoritative answer. Relay it \
to the user verbatim, including its Sources section. If it reports that it does not have \
enough information, you MUST relay that exact message to the user.
- You are strictly forbidden from using your own general knowledge to answer questions. Your \
knowledge comes ONLY from your tools.
- For simple greetings, farewells, or other conversational filler, you can respond naturally \
without using a tool.";

/// Build the grounded-answering system prompt around the retrieved context.
pub fn qa_system_prompt(context: &str) -> String {
    format!(
        "You are a helpful assistant for question-answering over documents. \
Your sole purpose is to provide concise and informative answers derived strictly and \
directly from the provided context. \
If the context does not contain the answer, or if you cannot directly infer the answer \
from the context, reply with exactly: \"{REFUSAL}\" \
Do not make up information or attempt to answer questions outside the scope of the context. \
Be as informative as possible; where the context allows, point out where to find more \
information about the question asked.\n\nContext:\n{context}"
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn qa_prompt_embeds_context_and_refusal() {
        let prompt = qa_system_prompt("OMEdit is the GUI");
        assert!(prompt.contains("OMEdit is the GUI"));
        assert!(prompt.contains(REFUSAL));
    }

    #[test]
    fn router_prompt_names_every_tool() {
        assert!(ROUTER_SYSTEM_PROMPT.contains(DOC_QA_TOOL));
        assert!(ROUTER_SYSTEM_PROMPT.contains("save_conversation"));
        assert!(ROUTER_SYSTEM_PROMPT.contains("get_current_time"));
    }
}
