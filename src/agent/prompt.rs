//! Prompt templates sent to the remote model.
//!
//! Every template is fixed text around the user's literal input. The
//! three step templates are issued in order by the multi-step path.

/// Instructional preamble wrapped around every single-step request.
pub fn enhanced_prompt(user_input: &str) -> String {
    format!(
        "You are an advanced autonomous AI agent capable of performing multi-step tasks including:\n\
         \n\
         1. **Information Search & Retrieval**: Finding relevant data from various sources\n\
         2. **Data Analysis & Processing**: Analyzing information and identifying patterns\n\
         3. **Summarization**: Creating concise, accurate summaries\n\
         4. **Information Extraction**: Extracting key insights and structured data\n\
         5. **Workflow Orchestration**: Breaking down complex tasks into manageable steps\n\
         \n\
         For the following request: \"{user_input}\"\n\
         \n\
         If this is a complex multi-step task, provide a comprehensive response that demonstrates:\n\
         - Step-by-step reasoning\n\
         - Information gathering approach\n\
         - Analysis methodology\n\
         - Clear conclusions and insights\n\
         \n\
         Be thorough, accurate, and demonstrate advanced reasoning capabilities."
    )
}

/// Step 1: task analysis.
pub fn analysis_prompt(task: &str) -> String {
    format!(
        "Analyze this task and create a detailed execution plan:\n\
         \"{task}\"\n\
         \n\
         Provide:\n\
         1. Task breakdown into clear steps\n\
         2. Required information sources\n\
         3. Analysis methodology\n\
         4. Expected deliverables\n\
         \n\
         Format as a structured plan."
    )
}

/// Step 2: information gathering.
pub fn gathering_prompt(task: &str) -> String {
    format!(
        "Based on the task: \"{task}\"\n\
         \n\
         Gather comprehensive information by:\n\
         1. Identifying key concepts and requirements\n\
         2. Suggesting information sources\n\
         3. Outlining search strategies\n\
         4. Defining success criteria\n\
         \n\
         Provide detailed information gathering approach."
    )
}

/// Step 3: analysis and synthesis.
pub fn synthesis_prompt(task: &str) -> String {
    format!(
        "For the task: \"{task}\"\n\
         \n\
         Perform comprehensive analysis including:\n\
         1. Data processing and organization\n\
         2. Pattern identification\n\
         3. Insight extraction\n\
         4. Conclusion synthesis\n\
         \n\
         Provide detailed analysis and findings."
    )
}

/// Combine the three step replies into the final formatted block.
///
/// The order is fixed: task description, then the three step outputs.
pub fn task_report(task: &str, analysis: &str, gathering: &str, synthesis: &str) -> String {
    format!(
        "**MULTI-STEP TASK EXECUTION COMPLETE**\n\
         \n\
         **Task:** {task}\n\
         \n\
         **Step 1 - Task Analysis:**\n\
         {analysis}\n\
         \n\
         **Step 2 - Information Gathering:**\n\
         {gathering}\n\
         \n\
         **Step 3 - Analysis & Synthesis:**\n\
         {synthesis}\n\
         \n\
         **Final Deliverable:**\n\
         Task execution completed with comprehensive analysis and actionable insights."
    )
}
