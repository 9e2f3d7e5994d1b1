//! Embedded single-page chat UI.
//!
//! The page keeps only a session id; after every interaction it refetches
//! its session snapshot and re-renders the whole message list.

use axum::response::Html;

/// GET /
pub async fn index() -> Html<&'static str> {
    Html(INDEX_HTML)
}

const INDEX_HTML: &str = r#"<!DOCTYPE html>
<html lang="en">
<head>
<meta charset="utf-8">
<meta name="viewport" content="width=device-width, initial-scale=1">
<title>Autonomous AI Agent</title>
<style>
  body { font-family: system-ui, sans-serif; margin: 0; background: #f7f7fb; color: #222; }
  .layout { display: flex; max-width: 1100px; margin: 0 auto; gap: 1rem; padding: 1rem; }
  .main { flex: 3; }
  .side { flex: 1; }
  h1 { text-align: center; font-size: 2rem; background: linear-gradient(90deg, #667eea, #764ba2);
       -webkit-background-clip: text; -webkit-text-fill-color: transparent; }
  .subtitle { text-align: center; color: #666; margin-bottom: 1.5rem; }
  .card { background: #fff; border-radius: 10px; padding: 1rem; margin-bottom: 1rem;
          box-shadow: 0 2px 4px rgba(0,0,0,0.08); }
  .msg { padding: 0.75rem 1rem; border-radius: 10px; margin-bottom: 0.75rem; white-space: pre-wrap; }
  .msg.user { background: #e3f2fd; border-left: 4px solid #2196f3; }
  .msg.agent { background: #f3e5f5; border-left: 4px solid #9c27b0; }
  .msg.task { background: #e8f5e8; border-left: 4px solid #4caf50; }
  .msg.error { background: #ffebee; border-left: 4px solid #f44336; }
  .step { background: #fff3cd; border-left: 3px solid #ffc107; border-radius: 5px;
          padding: 0.4rem 0.6rem; margin: 0.25rem 0; font-size: 0.9rem; }
  .task-record { font-size: 0.85rem; color: #555; margin: 0.25rem 0; }
  form { display: flex; gap: 0.5rem; }
  input[type=text] { flex: 1; padding: 0.6rem; border: 1px solid #ccc; border-radius: 8px; }
  button { padding: 0.6rem 1rem; border: 0; border-radius: 8px; background: #667eea;
           color: #fff; cursor: pointer; }
  button.secondary { background: #aaa; }
  button:disabled { opacity: 0.5; cursor: wait; }
  dl { margin: 0; } dt { font-weight: 600; } dd { margin: 0 0 0.5rem 0; color: #555; }
</style>
</head>
<body>
<h1>Autonomous AI Agent</h1>
<p class="subtitle">Multi-Step Task Execution &bull; Information Extraction &bull; Intelligent Summarization</p>
<div class="layout">
  <div class="main">
    <div class="card">
      <div id="messages"></div>
      <div id="steps"></div>
      <form id="chat-form">
        <input type="text" id="input" placeholder="Describe your multi-step task..." autocomplete="off">
        <button type="submit" id="send">Send</button>
        <button type="button" class="secondary" id="clear">Clear chat</button>
      </form>
    </div>
  </div>
  <div class="side">
    <div class="card">
      <h3>Agent status</h3>
      <dl id="agent-info"><dd>Loading...</dd></dl>
    </div>
    <div class="card">
      <h3>Recent tasks</h3>
      <div id="tasks"><em>None yet</em></div>
    </div>
  </div>
</div>
<script>
let sessionId = null;

async function fetchAgentInfo() {
  const res = await fetch('/api/agent');
  const info = await res.json();
  document.getElementById('agent-info').innerHTML =
    '<dt>Model</dt><dd>' + info.model + '</dd>' +
    '<dt>Provider</dt><dd>' + info.provider + '</dd>' +
    '<dt>Temperature</dt><dd>' + info.temperature + '</dd>' +
    '<dt>Max tokens</dt><dd>' + info.max_tokens + '</dd>';
}

function renderSnapshot(snapshot) {
  const messages = document.getElementById('messages');
  messages.innerHTML = '';
  for (const m of snapshot.messages) {
    const div = document.createElement('div');
    div.className = 'msg ' + (m.is_error ? 'error' : m.is_task ? 'task' : m.role === 'You' ? 'user' : 'agent');
    div.textContent = m.role + ': ' + m.content;
    messages.appendChild(div);
  }
  const steps = document.getElementById('steps');
  steps.innerHTML = '';
  if (snapshot.workflow_steps.length) {
    const title = document.createElement('h4');
    title.textContent = 'Current workflow';
    steps.appendChild(title);
    for (const s of snapshot.workflow_steps) {
      const div = document.createElement('div');
      div.className = 'step';
      div.textContent = s;
      steps.appendChild(div);
    }
  }
  const tasks = document.getElementById('tasks');
  if (snapshot.task_history.length) {
    tasks.innerHTML = '';
    for (const t of snapshot.task_history.slice(-3)) {
      const div = document.createElement('div');
      div.className = 'task-record';
      div.textContent = t.timestamp + ': ' + t.task;
      tasks.appendChild(div);
    }
  } else {
    tasks.innerHTML = '<em>None yet</em>';
  }
  messages.scrollTop = messages.scrollHeight;
}

async function refresh() {
  if (!sessionId) return;
  const res = await fetch('/api/session/' + sessionId);
  if (res.ok) renderSnapshot(await res.json());
}

document.getElementById('chat-form').addEventListener('submit', async (e) => {
  e.preventDefault();
  const input = document.getElementById('input');
  const message = input.value.trim();
  if (!message) return;
  const send = document.getElementById('send');
  send.disabled = true;
  input.value = '';
  try {
    const res = await fetch('/api/chat', {
      method: 'POST',
      headers: { 'Content-Type': 'application/json' },
      body: JSON.stringify({ session_id: sessionId, message }),
    });
    const body = await res.json();
    if (res.ok) sessionId = body.session_id;
  } finally {
    send.disabled = false;
  }
  await refresh();
});

document.getElementById('clear').addEventListener('click', async () => {
  if (!sessionId) return;
  await fetch('/api/reset', {
    method: 'POST',
    headers: { 'Content-Type': 'application/json' },
    body: JSON.stringify({ session_id: sessionId }),
  });
  await refresh();
});

fetchAgentInfo();
</script>
</body>
</html>
"#;
