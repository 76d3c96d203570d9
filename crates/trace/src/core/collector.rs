//! The collector program injected into the node alongside the simulated call.
//!
//! Nodes evaluate the tracer internally and only return its final structured
//! result, so the collector is shipped as an opaque source payload rather
//! than as host-language logic. It is deliberately dumb: it records the raw
//! per-instruction event stream, emitted logs and fault lines, and leaves all
//! frame reconstruction and classification to the native builder. Written in
//! the ES5 subset the node-side interpreter supports.

/// Source of the frame/opcode collector, passed verbatim in the `tracer`
/// field of the `debug_traceCall` request. Its result deserializes into
/// [`crate::RawCollectorOutput`].
pub const FRAME_COLLECTOR: &str = r#"{
    events: [],
    logs: [],
    debug: [],

    fault: function (log, db) {
        this.debug.push('fault depth=' + log.getDepth() + ' gas=' + log.getGas() +
            ' cost=' + log.getCost() + ' err=' + log.getError());
    },

    result: function (ctx, db) {
        var failed = typeof ctx.error !== 'undefined' && ctx.error !== null && ctx.error !== '';
        return {
            events: this.events,
            logs: this.logs,
            debug: this.debug,
            failed: failed,
            error: failed ? ctx.error.toString() : null,
            output: typeof ctx.output !== 'undefined' && ctx.output !== null ? toHex(ctx.output) : '0x'
        };
    },

    step: function (log, db) {
        var opcode = log.op.toString();
        var entry = { depth: log.getDepth(), op: opcode };
        if (log.getGas() < log.getCost()) {
            entry.oog = true;
        }
        this.events.push(entry);

        if (opcode.slice(0, 3) === 'LOG') {
            var count = parseInt(opcode.slice(3));
            var ofs = parseInt(log.stack.peek(0).toString());
            var len = parseInt(log.stack.peek(1).toString());
            var topics = [];
            for (var i = 0; i < count; i++) {
                var topic = log.stack.peek(2 + i).toString(16);
                while (topic.length < 64) {
                    topic = '0' + topic;
                }
                topics.push('0x' + topic);
            }
            this.logs.push({ topics: topics, data: toHex(log.memory.slice(ofs, ofs + len)) });
        }
    }
}"#;
