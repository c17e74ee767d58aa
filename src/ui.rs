use crate::view::View;

pub fn render_page(view: &View) -> String {
    let json = serde_json::to_string(view).unwrap_or_else(|_| "null".to_string());
    INDEX_HTML.replace("{{VIEW}}", &json.replace("</", "<\\/"))
}

const INDEX_HTML: &str = r#"<!DOCTYPE html>
<html lang="en">
<head>
  <meta charset="UTF-8" />
  <meta name="viewport" content="width=device-width, initial-scale=1.0" />
  <title>Habitfire</title>
  <style>
    @import url('https://fonts.googleapis.com/css2?family=Space+Grotesk:wght@400;500;600&family=Fraunces:wght@600&display=swap');

    :root {
      --bg-1: #1d1a24;
      --bg-2: #3a2230;
      --ink: #f6efe6;
      --muted: #b9ada3;
      --accent: #ff7a3d;
      --accent-2: #ffc24a;
      --card: rgba(34, 29, 40, 0.9);
      --shadow: 0 24px 60px rgba(0, 0, 0, 0.35);
    }

    * {
      box-sizing: border-box;
    }

    body {
      margin: 0;
      min-height: 100vh;
      background: radial-gradient(circle at top, var(--bg-2), transparent 60%),
        linear-gradient(160deg, var(--bg-1), #14121a 100%);
      color: var(--ink);
      font-family: "Space Grotesk", "Trebuchet MS", sans-serif;
      display: grid;
      place-items: center;
      padding: 32px 18px 48px;
    }

    .hidden {
      display: none !important;
    }

    .card {
      width: min(420px, 100%);
      background: var(--card);
      border-radius: 28px;
      box-shadow: var(--shadow);
      padding: 36px;
      display: grid;
      gap: 22px;
      text-align: center;
    }

    h1 {
      font-family: "Fraunces", "Georgia", serif;
      font-weight: 600;
      font-size: clamp(1.8rem, 4vw, 2.4rem);
      margin: 0;
    }

    input, select {
      width: 100%;
      padding: 14px 16px;
      border-radius: 14px;
      border: 1px solid rgba(255, 255, 255, 0.12);
      background: rgba(255, 255, 255, 0.06);
      color: var(--ink);
      font: inherit;
    }

    button {
      border: none;
      border-radius: 14px;
      padding: 14px 18px;
      font: inherit;
      font-weight: 600;
      cursor: pointer;
      background: var(--accent);
      color: #1d1a24;
    }

    button:disabled {
      opacity: 0.4;
      cursor: not-allowed;
    }

    .flame {
      position: relative;
      justify-self: center;
      width: 132px;
      height: 132px;
      border-radius: 50%;
      font-size: 4rem;
      background: radial-gradient(circle, var(--accent-2), var(--accent));
    }

    .badge {
      position: absolute;
      top: 4px;
      right: 4px;
      min-width: 32px;
      padding: 4px 8px;
      border-radius: 999px;
      background: var(--ink);
      color: #1d1a24;
      font-size: 0.9rem;
      display: none;
    }

    .badge.show {
      display: block;
    }

    .streak .value {
      font-size: 2.4rem;
      font-weight: 600;
      color: var(--accent-2);
    }

    .streak .label {
      color: var(--muted);
      text-transform: uppercase;
      letter-spacing: 0.12em;
      font-size: 0.8rem;
    }

    .overlay {
      position: fixed;
      inset: 0;
      background: rgba(0, 0, 0, 0.55);
      display: none;
    }

    .modal {
      position: fixed;
      left: 50%;
      top: 50%;
      transform: translate(-50%, -50%);
      display: none;
    }

    .overlay.open, .modal.open {
      display: grid;
    }

    .close {
      justify-self: end;
      background: transparent;
      color: var(--muted);
      padding: 4px 8px;
    }
  </style>
</head>
<body>
  <section id="loginScreen" class="card">
    <h1>Habitfire</h1>
    <input id="username" placeholder="Your name" autocomplete="off" />
    <button id="startBtn" disabled>Start</button>
  </section>

  <section id="mainScreen" class="card hidden">
    <h1 id="hello"></h1>
    <button id="flameBtn" class="flame" aria-label="Log an activity">
      🔥<span id="countBadge" class="badge"></span>
    </button>
    <div class="streak">
      <div class="value" id="streakCount">0</div>
      <div class="label">day streak</div>
    </div>
  </section>

  <div id="overlay" class="overlay"></div>
  <section id="logModal" class="card modal">
    <button id="closeModal" class="close" aria-label="Close">✕</button>
    <input id="activityInput" placeholder="What did you do?" autocomplete="off" />
    <select id="durationSelect">
      <option value="">Duration</option>
    </select>
    <button id="logBtn" disabled>Log it</button>
  </section>

  <script>
    const $ = (id) => document.getElementById(id);
    const els = {
      loginScreen: $('loginScreen'),
      mainScreen: $('mainScreen'),
      username: $('username'),
      startBtn: $('startBtn'),
      hello: $('hello'),
      flameBtn: $('flameBtn'),
      countBadge: $('countBadge'),
      streakCount: $('streakCount'),
      overlay: $('overlay'),
      modal: $('logModal'),
      closeModal: $('closeModal'),
      activityInput: $('activityInput'),
      durationSelect: $('durationSelect'),
      logBtn: $('logBtn')
    };

    const initial = {{VIEW}};
    let view = null;
    let queue = Promise.resolve();

    const setValue = (el, value) => {
      if (document.activeElement !== el && el.value !== value) {
        el.value = value;
      }
    };

    const populateDurations = (options) => {
      const frag = document.createDocumentFragment();
      options.forEach((option) => {
        const el = document.createElement('option');
        el.value = String(option.minutes);
        el.textContent = option.label;
        frag.appendChild(el);
      });
      els.durationSelect.appendChild(frag);
    };

    const render = (next) => {
      const wasOpen = view && view.modal.open;
      view = next;
      const main = view.screen === 'main';
      els.loginScreen.classList.toggle('hidden', main);
      els.mainScreen.classList.toggle('hidden', !main);

      setValue(els.username, view.username_field);
      els.startBtn.disabled = !view.login_enabled;
      els.hello.textContent = view.greeting;

      els.countBadge.textContent = view.badge.text;
      els.countBadge.classList.toggle('show', view.badge.visible);
      els.streakCount.textContent = String(view.streak);

      els.overlay.classList.toggle('open', view.modal.open);
      els.modal.classList.toggle('open', view.modal.open);
      if (view.modal.open && !wasOpen) {
        els.activityInput.value = view.modal.activity;
        els.durationSelect.value = view.modal.duration ? String(view.modal.duration) : '';
        setTimeout(() => els.activityInput.focus(), 50);
      }
      els.logBtn.disabled = !view.modal.submit_enabled;
    };

    const send = (intent) => {
      queue = queue
        .then(() => fetch('/api/intent', {
          method: 'POST',
          headers: { 'content-type': 'application/json' },
          body: JSON.stringify(intent)
        }))
        .then((res) => (res.ok ? res.json() : null))
        .then((next) => { if (next) render(next); })
        .catch(() => {});
      return queue;
    };

    els.username.addEventListener('input', () => {
      send({ type: 'edit_username', value: els.username.value });
    });

    els.startBtn.addEventListener('click', () => {
      send({ type: 'login', name: els.username.value });
    });

    els.username.addEventListener('keydown', (event) => {
      if (event.key === 'Enter') {
        event.preventDefault();
        queue.then(() => {
          if (view.login_enabled) send({ type: 'login', name: els.username.value });
        });
      }
    });

    els.flameBtn.addEventListener('click', () => send({ type: 'open_entry_modal' }));
    els.closeModal.addEventListener('click', () => send({ type: 'close_entry_modal' }));
    els.overlay.addEventListener('click', (event) => {
      if (event.target === els.overlay) send({ type: 'close_entry_modal' });
    });

    els.activityInput.addEventListener('input', () => {
      send({ type: 'edit_activity', text: els.activityInput.value });
    });
    els.durationSelect.addEventListener('change', () => {
      send({ type: 'select_duration', value: els.durationSelect.value });
    });
    els.logBtn.addEventListener('click', () => send({ type: 'submit_pending' }));

    populateDurations(initial.durations);
    render(initial);
    if (!els.mainScreen.classList.contains('hidden')) {
      els.flameBtn.focus();
    } else {
      setTimeout(() => els.username.focus(), 60);
    }
  </script>
</body>
</html>
"#;
