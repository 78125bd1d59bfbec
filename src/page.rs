//! The browser upload page served at `/`.

use crate::prompt::ResultView;

const VIEW_PLACEHOLDER: &str = "__RESULT_VIEW__";

/// Renders the upload page for the given result presentation.
pub fn render(view: ResultView) -> String {
    PAGE.replace(VIEW_PLACEHOLDER, view.as_str())
}

const PAGE: &str = r#"<!DOCTYPE html>
<html lang="en">
<head>
    <meta charset="UTF-8">
    <meta name="viewport" content="width=device-width, initial-scale=1.0">
    <title>Smart Grocery List Organizer</title>
    <style>
        * {
            margin: 0;
            padding: 0;
            box-sizing: border-box;
        }

        body {
            font-family: -apple-system, BlinkMacSystemFont, 'Segoe UI', Roboto, sans-serif;
            background: #000;
            color: #d1d5db;
            min-height: 100vh;
            padding: 24px;
        }

        .container {
            max-width: 672px;
            margin: 0 auto;
            display: flex;
            flex-direction: column;
            gap: 24px;
        }

        header {
            text-align: center;
        }

        h1 {
            color: #fff;
            font-size: 1.9em;
            margin-bottom: 12px;
        }

        .subtitle {
            color: #9ca3af;
        }

        .upload-area {
            border: 2px dashed #374151;
            border-radius: 12px;
            padding: 32px;
            text-align: center;
            background: rgba(17, 24, 39, 0.5);
            transition: border-color 0.2s;
        }

        .upload-area:hover {
            border-color: #4b5563;
        }

        .upload-area label {
            cursor: pointer;
            display: flex;
            flex-direction: column;
            align-items: center;
            gap: 12px;
            font-size: 0.9em;
            color: #9ca3af;
        }

        .upload-icon {
            font-size: 2em;
            padding: 16px;
            background: #1f2937;
            border-radius: 50%;
        }

        input[type="file"] {
            display: none;
        }

        .preview {
            display: none;
            max-height: 256px;
            max-width: 100%;
            margin: 16px auto 0;
            border-radius: 8px;
            border: 1px solid #374151;
            object-fit: contain;
        }

        button {
            width: 100%;
            padding: 12px 16px;
            border: none;
            border-radius: 8px;
            background: #2563eb;
            color: #fff;
            font-size: 1em;
            cursor: pointer;
        }

        button:hover:not(:disabled) {
            background: #1d4ed8;
        }

        button:disabled {
            background: #1f2937;
            color: #6b7280;
            cursor: not-allowed;
        }

        .error {
            display: none;
            background: rgba(127, 29, 29, 0.5);
            border: 1px solid #991b1b;
            color: #fecaca;
            border-radius: 8px;
            padding: 14px;
        }

        .result {
            display: none;
            border: 1px solid #1f2937;
            border-radius: 12px;
            padding: 24px;
            background: rgba(17, 24, 39, 0.5);
        }

        .result h2 {
            color: #fff;
            font-size: 1.25em;
            margin-bottom: 16px;
        }

        .result ul {
            list-style: disc inside;
        }

        .result pre {
            white-space: pre-wrap;
            font-family: inherit;
        }
    </style>
</head>
<body data-view="__RESULT_VIEW__">
    <div class="container">
        <header>
            <h1>Smart Grocery List Organizer</h1>
            <p class="subtitle" id="subtitle"></p>
        </header>

        <div class="upload-area">
            <input type="file" id="fileInput" accept="image/*">
            <label for="fileInput">
                <span class="upload-icon">📷</span>
                <span>Click to upload your grocery list image</span>
            </label>
            <img id="preview" class="preview" alt="Preview">
        </div>

        <button id="submit" disabled>Organize List</button>

        <div class="error" id="error"></div>

        <div class="result" id="result">
            <h2 id="resultTitle"></h2>
            <ul id="items"></ul>
            <pre id="text"></pre>
        </div>
    </div>

    <script>
        const view = document.body.dataset.view;
        const fileInput = document.getElementById('fileInput');
        const preview = document.getElementById('preview');
        const submitButton = document.getElementById('submit');
        const errorDiv = document.getElementById('error');
        const resultDiv = document.getElementById('result');
        const itemsList = document.getElementById('items');
        const rawText = document.getElementById('text');

        const idleLabel = view === 'list' ? 'Organize List' : 'Describe Image';
        const busyLabel = view === 'list' ? 'Organizing your list...' : 'Reading your image...';

        document.getElementById('subtitle').textContent = view === 'list'
            ? "Upload a picture of your grocery list, and I'll organize items from most fragile to least fragile"
            : "Upload a picture, and I'll describe what's in it";
        document.getElementById('resultTitle').textContent = view === 'list'
            ? 'Your Organized Grocery List'
            : 'Result';

        const state = {
            file: null,
            loading: false,
        };

        function render() {
            submitButton.disabled = !state.file || state.loading;
            submitButton.textContent = state.loading ? busyLabel : idleLabel;
        }

        function setError(message) {
            errorDiv.textContent = message;
            errorDiv.style.display = message ? 'block' : 'none';
        }

        function clearResult() {
            itemsList.replaceChildren();
            rawText.textContent = '';
            resultDiv.style.display = 'none';
        }

        function extractGroceryList(text) {
            const match = text.match(/"grocery_list":\s*(\[[^\]]*\])/);
            if (!match) {
                throw new Error('Failed to extract grocery list from response');
            }
            const items = JSON.parse(match[1]);
            items.forEach((item, index) => {
                if (typeof item !== 'string') {
                    throw new Error('grocery list item ' + index + ' is not a string');
                }
            });
            return items;
        }

        function showResult(text) {
            if (view === 'list') {
                const items = extractGroceryList(text);
                for (const item of items) {
                    const li = document.createElement('li');
                    li.textContent = item;
                    itemsList.appendChild(li);
                }
                rawText.style.display = 'none';
                if (items.length === 0) {
                    return;
                }
            } else {
                rawText.textContent = text;
                itemsList.style.display = 'none';
            }
            resultDiv.style.display = 'block';
        }

        fileInput.addEventListener('change', (e) => {
            const file = e.target.files[0] || null;
            if (file && file.type.startsWith('image/')) {
                state.file = file;
                setError('');
                const reader = new FileReader();
                reader.onloadend = () => {
                    if (state.file !== file) {
                        return;
                    }
                    preview.src = reader.result;
                    preview.style.display = 'block';
                };
                reader.readAsDataURL(file);
            } else {
                state.file = null;
                preview.removeAttribute('src');
                preview.style.display = 'none';
                setError('Please select a valid image file');
            }
            render();
        });

        submitButton.addEventListener('click', async () => {
            if (!state.file) {
                setError('Please select an image first');
                return;
            }

            state.loading = true;
            setError('');
            clearResult();
            render();

            try {
                const formData = new FormData();
                formData.append('file', state.file);

                const response = await fetch('/api/grocery', {
                    method: 'POST',
                    body: formData
                });
                const data = await response.json();

                if (!response.ok) {
                    throw new Error(data.error || 'Failed to process the image');
                }

                showResult(data.result);
            } catch (err) {
                clearResult();
                setError(err instanceof Error && err.message
                    ? err.message
                    : 'An error occurred while processing your request');
            } finally {
                state.loading = false;
                render();
            }
        });

        render();
    </script>
</body>
</html>
"#;
