use stickynotes_core::{Note, NoteDisplay};

/// Display sink that keeps every view it was given.
#[derive(Debug, Default)]
pub struct RecordingDisplay {
    pub views: Vec<Vec<Note>>,
}

impl RecordingDisplay {
    pub fn last(&self) -> Option<&[Note]> {
        self.views.last().map(Vec::as_slice)
    }
}

impl NoteDisplay for RecordingDisplay {
    fn display(&mut self, notes: &[Note]) {
        self.views.push(notes.to_vec());
    }
}
