//! HTML pages served to phones and to the classroom display
//!
//! Both pages share `/static/script.js`, which picks its behaviour from the
//! `celular` / `lousa` class on `<body>`.

/// Client script shared by both pages
pub const SCRIPT_JS: &str = include_str!("../static/script.js");

const QR_LIB_URL: &str = "https://cdnjs.cloudflare.com/ajax/libs/qrcodejs/1.0.0/qrcode.min.js";

/// Submission page opened on the guardian's phone
pub fn celular_page() -> String {
    base_template(
        "Resgate",
        "celular",
        r#"
    <div class="phone tilt" id="phoneFrame">
        <span class="chip" id="connChip">Conectando…</span>
        <h1>Chegou para buscar?</h1>
        <p class="muted" id="statusText">Digite seu nome e confirme.</p>
        <input id="nomeCelular" type="text" maxlength="60" autocomplete="name"
               placeholder="Ex: Ana, pai do João"
               onkeydown="if (event.key === 'Enter') enviarCelular()">
        <button id="btnEnviar" onclick="enviarCelular()">Enviar</button>
    </div>"#,
        "",
    )
}

/// Display page projected in the classroom
pub fn lousa_page(public_url: &str) -> String {
    let head = format!(
        r#"<script src="{qr_lib}"></script>
    <script>window.PUBLIC_URL = {public_url};</script>"#,
        qr_lib = QR_LIB_URL,
        public_url = js_string_literal(public_url),
    );

    base_template(
        "Lousa",
        "lousa",
        r#"
    <span class="chip" id="connChip">Conectando…</span>
    <div class="ticker"><div class="ticker-track" id="tickerTrack">
        <span>Bem-vindos!</span><span>Escaneie o QR e digite seu nome</span>
    </div></div>
    <main class="board">
        <section class="card tilt">
            <h2>Chegadas</h2>
            <div class="big" id="totalCount">0</div>
            <h3>Recentes</h3>
            <div id="recentList">—</div>
        </section>
        <section class="card tilt">
            <h2>Ranking</h2>
            <ol id="rankList"><li class="muted">—</li></ol>
        </section>
        <section class="card">
            <h2>Entre pelo celular</h2>
            <div id="qrcode"></div>
            <div class="small" id="qrUrl"></div>
        </section>
    </main>
    <div class="overlay hidden" id="overlay">
        <div class="overlay-card" id="overlayCard">
            <p>Chegou</p>
            <div class="big" id="nomeNaLousa"></div>
            <p class="small" id="countdown"></p>
        </div>
    </div>"#,
        &head,
    )
}

fn base_template(title: &str, body_class: &str, content: &str, extra_head: &str) -> String {
    format!(
        r#"<!DOCTYPE html>
<html lang="pt-BR">
<head>
    <meta charset="UTF-8">
    <meta name="viewport" content="width=device-width, initial-scale=1.0">
    <title>{title}</title>
    <style>{styles}</style>
    {extra_head}
</head>
<body class="{body_class}">
    <canvas id="bg"></canvas>
    <canvas id="fx"></canvas>
    {content}
    <script src="/static/script.js"></script>
</body>
</html>"#,
        title = title,
        styles = common_styles(),
        extra_head = extra_head,
        body_class = body_class,
        content = content,
    )
}

fn common_styles() -> &'static str {
    r#"
        * { margin: 0; padding: 0; box-sizing: border-box; }
        body { font-family: -apple-system, 'Segoe UI', Roboto, sans-serif; background: #0b1437; color: #fff; min-height: 100vh; }
        canvas { position: fixed; inset: 0; pointer-events: none; }
        .chip { position: fixed; top: 12px; right: 12px; padding: 4px 12px; border: 1px solid rgba(255,255,255,.18); border-radius: 999px; font-size: .85em; }
        .muted { opacity: .7; }
        .small { font-size: .85em; }
        .big { font-size: 4em; font-weight: 700; color: #f7c600; }
        .phone { max-width: 420px; margin: 15vh auto 0; padding: 28px; background: rgba(255,255,255,.06); border-radius: 24px; }
        .phone input { width: 100%; margin: 18px 0 12px; padding: 14px; font-size: 1.2em; border-radius: 12px; border: none; }
        .phone button { width: 100%; padding: 14px; font-size: 1.2em; border-radius: 12px; border: none; background: #f7c600; font-weight: 700; }
        .board { display: grid; grid-template-columns: repeat(3, 1fr); gap: 24px; padding: 80px 32px 32px; }
        .card { padding: 24px; background: rgba(255,255,255,.06); border-radius: 20px; }
        .rank-item { display: flex; justify-content: space-between; font-size: 1.3em; }
        .ticker { overflow: hidden; white-space: nowrap; background: #1d5cff; padding: 8px 0; }
        .ticker-track span { margin: 0 48px; }
        .overlay { position: fixed; inset: 0; display: flex; align-items: center; justify-content: center; background: rgba(11,20,55,.85); }
        .overlay.hidden { display: none; }
        .overlay-card { text-align: center; padding: 48px; }
        .shake { animation: shake .6s; }
        @keyframes shake { 25% { transform: translateX(-6px); } 75% { transform: translateX(6px); } }
    "#
}

/// Encode a string as a JS literal that is safe inside a `<script>` block
fn js_string_literal(value: &str) -> String {
    serde_json::to_string(value)
        .unwrap_or_else(|_| "\"\"".to_string())
        .replace('<', "\\u003c")
        .replace('>', "\\u003e")
}
