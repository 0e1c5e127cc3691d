//! The built-in home document shown by tabs opened without a target.

/// Address reported for the home document.
pub const HOME_URL: &str = "about:blank";

/// Renders the home document with the given page title.
pub fn home_document(title: &str) -> String {
    let title = escape_html(title);
    format!(
        r#"<!DOCTYPE html>
<html>
<head>
<meta charset="UTF-8">
<title>{title}</title>
<style>
*{{margin:0;padding:0;box-sizing:border-box}}
body{{height:100vh;display:flex;justify-content:center;align-items:center;
background:linear-gradient(135deg,#0f0f0f 0%,#1a1a1a 50%,#2d1b69 100%);
color:#fff;font-family:"Segoe UI",Arial,sans-serif;text-align:center}}
.container{{background:rgba(30,30,30,.8);padding:40px;border-radius:20px;border:1px solid #333}}
h1{{font-size:2.5em;margin-bottom:20px;color:#00aaff}}
p{{font-size:1.2em;color:#ccc;margin-bottom:10px}}
.shortcuts{{margin-top:30px;font-size:.9em;color:#888}}
</style>
</head>
<body>
<div class="container">
<h1>{title}</h1>
<p>Type a URL above or search the web</p>
<p>Ctrl+T = New Tab | Ctrl+Q = Quit | F5 = Reload | F11 = Fullscreen</p>
<div class="shortcuts">Alt+Left/Right = Back/Forward | Ctrl++/- = Zoom | Alt+Home = Home</div>
</div>
</body>
</html>"#
    )
}

fn escape_html(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            _ => out.push(c),
        }
    }
    out
}
