//! UI route - single HTML page (vanilla JS, no frameworks)

use axum::{
    response::{Html, IntoResponse},
    routing::get,
    Router,
};

use crate::AppState;

/// Build UI routes
pub fn ui_routes() -> Router<AppState> {
    Router::new().route("/", get(root_page))
}

/// Root page: search, multi-select, style and color, generate
async fn root_page() -> impl IntoResponse {
    Html(ROOT_PAGE)
}

const ROOT_PAGE: &str = r##"<!DOCTYPE html>
<html lang="en">
<head>
    <meta charset="UTF-8">
    <meta name="viewport" content="width=device-width, initial-scale=1.0">
    <title>moodcover - Playlist Cover Generator</title>
    <style>
        body {
            font-family: system-ui, -apple-system, sans-serif;
            max-width: 900px;
            margin: 40px auto;
            padding: 20px;
            line-height: 1.5;
        }
        h1 {
            color: #333;
            border-bottom: 2px solid #1db954;
            padding-bottom: 10px;
        }
        .row { display: flex; gap: 10px; align-items: center; margin: 12px 0; }
        input[type=text] { flex: 1; padding: 8px; }
        button {
            padding: 8px 18px;
            background: #1db954;
            color: white;
            border: none;
            border-radius: 4px;
            cursor: pointer;
        }
        button:disabled { background: #9bd4ae; cursor: wait; }
        .tracks { list-style: none; padding: 0; }
        .tracks li { display: flex; gap: 10px; align-items: center; padding: 4px 0; }
        .tracks img { width: 40px; height: 40px; object-fit: cover; }
        .no-preview { color: #999; font-size: 0.85em; }
        .error { color: #b00020; }
        #cover img { max-width: 512px; width: 100%; margin-top: 16px; }
        #prompt { color: #555; font-size: 0.9em; }
    </style>
</head>
<body>
    <h1>moodcover</h1>
    <p>Search for songs, pick the ones that set the mood, and generate a cover image from how they sound.</p>

    <div class="row">
        <input type="text" id="query" placeholder="Song or artist">
        <button id="search-btn">Search</button>
    </div>
    <p><small>Profile: <span id="profile">-</span></small></p>

    <ul class="tracks" id="tracks"></ul>

    <div class="row" id="styles">
        <label><input type="radio" name="style" value="color" checked> Color</label>
        <label><input type="radio" name="style" value="character"> Character</label>
        <label><input type="radio" name="style" value="landscape"> Landscape</label>
        <label><input type="radio" name="style" value="abstract"> Abstract</label>
        <input type="color" id="color" value="#1db954">
        <button id="generate-btn">Generate Cover</button>
    </div>

    <p id="status"></p>
    <div id="cover"></div>
    <p id="prompt"></p>

    <script>
        const $ = (id) => document.getElementById(id);

        function setStatus(text, isError) {
            $('status').textContent = text;
            $('status').className = isError ? 'error' : '';
        }

        async function call(method, url, body) {
            const options = { method, headers: { 'Content-Type': 'application/json' } };
            if (body !== undefined) options.body = JSON.stringify(body);
            const response = await fetch(url, options);
            const data = await response.json();
            if (!response.ok) {
                throw new Error(data.error ? data.error.message : response.statusText);
            }
            return data;
        }

        // Selection in the order the boxes were ticked
        let picked = [];

        const keyOf = (k) => k.title + '\u0000' + k.artist;

        function render(session) {
            $('profile').textContent = session.profile;
            const list = $('tracks');
            list.innerHTML = '';
            picked = session.selected.map(k => ({ title: k.title, artist: k.artist }));
            const selected = new Set(picked.map(keyOf));
            for (const track of session.candidates) {
                const li = document.createElement('li');
                const box = document.createElement('input');
                box.type = 'checkbox';
                box.checked = selected.has(keyOf(track));
                box.dataset.title = track.title;
                box.dataset.artist = track.artist;
                box.addEventListener('change', updateSelection);
                li.appendChild(box);
                if (track.artwork_url) {
                    const img = document.createElement('img');
                    img.src = track.artwork_url;
                    li.appendChild(img);
                }
                const label = document.createElement('span');
                label.textContent = track.title + ' - ' + track.artist;
                li.appendChild(label);
                if (!track.preview_url) {
                    const note = document.createElement('span');
                    note.className = 'no-preview';
                    note.textContent = '(no preview)';
                    li.appendChild(note);
                }
                list.appendChild(li);
            }
        }

        async function updateSelection(event) {
            const box = event.target;
            const key = { title: box.dataset.title, artist: box.dataset.artist };
            picked = picked.filter(k => keyOf(k) !== keyOf(key));
            if (box.checked) picked.push(key);
            try {
                render(await call('POST', '/api/selection', { tracks: picked }));
            } catch (e) {
                setStatus(e.message, true);
            }
        }

        $('search-btn').addEventListener('click', async () => {
            const query = $('query').value;
            $('search-btn').disabled = true;
            setStatus('Searching...');
            try {
                render(await call('POST', '/api/search', { query }));
                setStatus('');
            } catch (e) {
                setStatus(e.message, true);
            } finally {
                $('search-btn').disabled = false;
            }
        });

        $('generate-btn').addEventListener('click', async () => {
            const style = document.querySelector('input[name=style]:checked').value;
            const color = $('color').value;
            $('generate-btn').disabled = true;
            $('cover').innerHTML = '';
            $('prompt').textContent = '';
            setStatus('Analyzing previews and generating cover...');
            try {
                const result = await call('POST', '/api/generate', { style, color });
                const img = document.createElement('img');
                img.src = 'data:' + result.content_type + ';base64,' + result.image_base64;
                $('cover').appendChild(img);
                $('prompt').textContent = result.prompt;
                const skipped = result.skipped.length
                    ? ' Skipped: ' + result.skipped.map(k => k.title).join(', ') + '.'
                    : '';
                setStatus('Cover generated from ' + result.analyzed.length + ' track(s).' + skipped);
            } catch (e) {
                setStatus(e.message, true);
            } finally {
                $('generate-btn').disabled = false;
            }
        });

        call('GET', '/api/session').then(render).catch(e => setStatus(e.message, true));
    </script>
</body>
</html>
"##;
