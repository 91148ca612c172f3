//! Page-side functions evaluated through [`BrowserSession::evaluate`].
//!
//! Each constant is a JavaScript function expression; arguments are passed as
//! JSON values in the documented order.
//!
//! [`BrowserSession::evaluate`]: comoderator_protocols::BrowserSession::evaluate

/// `(itemSelectors, senderSelectors, textSelectors, timeSelectors) -> ChatEntry[]`
///
/// Items are matched with one combined selector so they come back in DOM
/// order. Invalid selectors are skipped.
pub const EXTRACT_CHAT: &str = r#"(itemSelectors, senderSelectors, textSelectors, timeSelectors) => {
  const valid = (selectors) => selectors.filter((s) => {
    try { document.createDocumentFragment().querySelector(s); return true; } catch (e) { return false; }
  });
  const first = (root, selectors) => {
    for (const s of selectors) {
      const el = root.querySelector(s);
      if (el) return el;
    }
    return null;
  };
  const items = valid(itemSelectors);
  const senders = valid(senderSelectors);
  const texts = valid(textSelectors);
  const times = valid(timeSelectors);
  if (items.length === 0) return [];
  return Array.from(document.querySelectorAll(items.join(', '))).map((item) => {
    const sender = first(item, senders);
    const text = first(item, texts);
    const time = first(item, times);
    const stamp = time ? (time.getAttribute('data-timestamp') || (time.textContent || '').trim()) : '';
    return {
      sender: (sender && (sender.textContent || '').trim()) || 'Unknown',
      text: text ? (text.textContent || '').trim() : '',
      observedAt: stamp ? String(stamp) : new Date().toISOString(),
    };
  });
}"#;

/// `(selector) -> bool`: focus the element and empty its value.
pub const CLEAR_INPUT: &str = r#"(selector) => {
  const el = document.querySelector(selector);
  if (!el) return false;
  el.focus();
  el.value = '';
  return true;
}"#;

/// `(selector, text) -> bool`: focus, set the value, and fire `input` and `change`.
pub const SET_INPUT_VALUE: &str = r#"(selector, text) => {
  const el = document.querySelector(selector);
  if (!el) return false;
  el.focus();
  el.value = text;
  el.dispatchEvent(new Event('input', { bubbles: true }));
  el.dispatchEvent(new Event('change', { bubbles: true }));
  return true;
}"#;

/// `(text, sendLabel, inputSelectors) -> bool`
///
/// Finds a button whose label matches `sendLabel` case-insensitively, fills
/// the first generic input that exists, and clicks the button. Returns false
/// when no such button exists.
pub const FALLBACK_POST: &str = r#"(text, sendLabel, inputSelectors) => {
  const escaped = sendLabel.replace(/[.*+?^${}()|[\]\\]/g, '\\$&');
  const pattern = new RegExp(escaped, 'i');
  const button = Array.from(document.querySelectorAll('button'))
    .find((b) => pattern.test(b.textContent || '') || pattern.test(b.getAttribute('aria-label') || ''));
  if (!button) return false;
  for (const s of inputSelectors) {
    let input = null;
    try { input = document.querySelector(s); } catch (e) { input = null; }
    if (input) {
      input.focus();
      input.value = text;
      input.dispatchEvent(new Event('input', { bubbles: true }));
      input.dispatchEvent(new Event('change', { bubbles: true }));
      break;
    }
  }
  button.click();
  return true;
}"#;
