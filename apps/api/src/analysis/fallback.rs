//! Static question bank used when the analyzer produces no questions.
//!
//! Three questions per catalog principle, keyed by catalog id.

use crate::analysis::catalog::find_principle;
use crate::analysis::models::{LeadershipPrinciple, Question, StarHints};

struct BankQuestion {
    question: &'static str,
    context: &'static str,
    /// situation, task, action, result
    hints: [&'static str; 4],
}

const fn q(question: &'static str, context: &'static str, hints: [&'static str; 4]) -> BankQuestion {
    BankQuestion {
        question,
        context,
        hints,
    }
}

const BANK: &[(&str, [BankQuestion; 3])] = &[
    ("customer-obsession", [
        q("Tell me about a time when you had to make a decision between what was best for the customer and what was easier for your company or team.",
          "Focus on a situation where customer needs conflicted with internal processes or constraints.",
          ["Describe the context and customer need", "What was your responsibility?", "What steps did you take?", "What was the customer impact?"]),
        q("Describe a time you used customer feedback to change the direction of a product or service.",
          "Show how you gathered the feedback and worked backwards from it.",
          ["What was the product and who were the customers?", "What did you need to decide?", "How did you act on the feedback?", "How did customer metrics change?"]),
        q("Tell me about a time you went well beyond what was expected to resolve a customer problem.",
          "Highlight earning and keeping trust, not just closing a ticket.",
          ["What went wrong for the customer?", "What did you own in fixing it?", "What extra steps did you take?", "How did the relationship change afterwards?"]),
    ]),
    ("ownership", [
        q("Describe a time when you took on something outside your area of responsibility because it was the right thing to do.",
          "Think about cross-functional challenges or gaps you identified and addressed.",
          ["Set the scene for the problem", "Why did you feel ownership?", "How did you take initiative?", "What was the long-term impact?"]),
        q("Tell me about a time you made a decision that traded short-term results for long-term value.",
          "Explain the trade-off and who you had to convince.",
          ["What pressure existed to go short-term?", "What long-term outcome were you protecting?", "How did you make and defend the call?", "What happened over time?"]),
        q("Describe a project that failed or went off track while you were responsible for it.",
          "Own the outcome; avoid blaming others.",
          ["What was the project and your role?", "What were you accountable for?", "What did you do when it went wrong?", "What did you change afterwards?"]),
    ]),
    ("invent-and-simplify", [
        q("Tell me about a time when you invented a solution or simplified a complex process.",
          "Focus on innovation that created measurable business value.",
          ["What was the complex challenge?", "What innovation was needed?", "How did you develop the solution?", "What efficiency gains resulted?"]),
        q("Describe a time you found a simpler way to do something others accepted as necessarily complicated.",
          "Show how you challenged the status quo.",
          ["What was the accepted process?", "What did you set out to simplify?", "How did you test and roll out the change?", "What did it save?"]),
        q("Tell me about an idea of yours that was initially rejected but later adopted.",
          "Show persistence and how you refined the idea.",
          ["What was the idea and the context?", "What objections did you face?", "How did you rework or prove it?", "What was the eventual outcome?"]),
    ]),
    ("are-right-a-lot", [
        q("Tell me about a time you made a judgment call that turned out to be right despite others disagreeing.",
          "Explain what informed your judgment.",
          ["What was the decision?", "Why was it yours to make?", "What data and instincts did you rely on?", "How was the call validated?"]),
        q("Describe a time you changed your mind after seeking out a different perspective.",
          "Show how you work to disconfirm your own beliefs.",
          ["What was your original position?", "What were you trying to decide?", "Whose perspective did you seek and why?", "What did you decide and what happened?"]),
        q("Tell me about a decision you got wrong. How did you recognise it?",
          "Focus on learning and correcting course.",
          ["What was the decision?", "What outcome were you aiming for?", "How did you detect and correct the mistake?", "What did you learn?"]),
    ]),
    ("learn-and-be-curious", [
        q("Tell me about a time you taught yourself a new skill to solve a problem.",
          "Highlight self-directed learning.",
          ["What problem needed the new skill?", "What did you need to learn and by when?", "How did you learn it?", "How did the skill change the outcome?"]),
        q("Describe a time curiosity led you to an insight others had missed.",
          "Show how exploring beyond the obvious paid off.",
          ["What were you looking into?", "What question were you trying to answer?", "What did you explore?", "What did the insight change?"]),
        q("Tell me about something you learned recently that changed how you work.",
          "Connect the learning to a concrete change in practice.",
          ["Where did the learning come from?", "What were you trying to improve?", "How did you apply it?", "What measurable difference did it make?"]),
    ]),
    ("hire-and-develop-the-best", [
        q("Tell me about a time when you helped develop someone on your team who was struggling.",
          "Focus on talent development and raising performance standards.",
          ["Who needed development?", "What was your role as developer?", "What development approach did you take?", "How did they improve?"]),
        q("Describe a hiring decision you made that raised the bar for your team.",
          "Explain how you assessed the candidate.",
          ["What role were you hiring for?", "What bar were you trying to raise?", "How did you evaluate and decide?", "How did the hire perform?"]),
        q("Tell me about a time you coached someone into a bigger role.",
          "Show deliberate investment in another person's growth.",
          ["Who was it and where did they start?", "What growth goal did you set?", "How did you coach them?", "Where did they end up?"]),
    ]),
    ("insist-on-the-highest-standards", [
        q("Tell me about a time you refused to compromise on quality despite pressure to ship.",
          "Explain the standard and the cost of holding it.",
          ["What was being shipped and what was the pressure?", "What standard were you protecting?", "What did you do to hold the line?", "What was the result for customers?"]),
        q("Describe a time you raised the quality bar for your team.",
          "Show a lasting mechanism, not a one-off fix.",
          ["What was the quality problem?", "What bar did you set?", "How did you drive adoption?", "How did quality metrics change?"]),
        q("Tell me about a defect or problem you made sure was fixed at its root.",
          "Focus on making sure it stayed fixed.",
          ["What was the problem?", "What did you own?", "How did you find and fix the root cause?", "How did you confirm it stayed fixed?"]),
    ]),
    ("think-big", [
        q("Tell me about a time you proposed a bold vision that went beyond what was asked.",
          "Show how you communicated direction and inspired others.",
          ["What was the starting point?", "What bigger opportunity did you see?", "How did you build support for it?", "What came of it?"]),
        q("Describe a time you turned a small project into something with much larger impact.",
          "Highlight how you saw past the immediate scope.",
          ["What was the original scope?", "What larger goal did you set?", "How did you expand the work?", "What was the final impact?"]),
        q("Tell me about a long-term strategy you created and drove.",
          "Connect the strategy to execution.",
          ["What was the business context?", "What did the strategy need to achieve?", "How did you build and socialise it?", "What results has it produced?"]),
    ]),
    ("bias-for-action", [
        q("Describe a situation where you had to make an important decision without having all the information you wanted.",
          "Highlight calculated risk-taking and decision-making under uncertainty.",
          ["What decision was needed?", "What information was missing?", "How did you proceed anyway?", "What was the outcome?"]),
        q("Tell me about a time you acted quickly to prevent a problem from getting worse.",
          "Show judgment about what was reversible.",
          ["What was happening?", "What needed to be done urgently?", "What did you do and how fast?", "What did your speed prevent?"]),
        q("Describe a time you unblocked a stalled project by taking action.",
          "Explain why waiting was the bigger risk.",
          ["Why had the project stalled?", "What did you decide to own?", "What actions did you take?", "How did the project progress afterwards?"]),
    ]),
    ("frugality", [
        q("Tell me about a time you delivered a result with fewer resources than you wanted.",
          "Show resourcefulness under constraints.",
          ["What was the goal and the constraint?", "What did you have to deliver?", "How did you make the most of what you had?", "What did you achieve and save?"]),
        q("Describe a time you found a way to significantly reduce cost without hurting quality.",
          "Quantify the savings.",
          ["Where was money being spent?", "What reduction were you targeting?", "What changes did you make?", "What were the savings and quality impact?"]),
        q("Tell me about a time you chose not to spend money or headcount on something.",
          "Explain the reasoning and the alternative you chose.",
          ["What was being requested?", "What was your responsibility?", "What did you do instead?", "How did it turn out?"]),
    ]),
    ("earn-trust", [
        q("Tell me about a time you had to rebuild trust with a colleague or stakeholder.",
          "Focus on candour and follow-through.",
          ["How was trust lost?", "What did you need to restore?", "What did you say and do?", "How did the relationship change?"]),
        q("Describe a time you delivered difficult feedback to someone senior.",
          "Show respect and candour together.",
          ["What was the situation?", "Why was the feedback yours to give?", "How did you deliver it?", "How was it received and what changed?"]),
        q("Tell me about a mistake you admitted publicly.",
          "Highlight being vocally self-critical.",
          ["What was the mistake?", "Who was affected?", "How did you communicate it?", "What did you do to make it right?"]),
    ]),
    ("dive-deep", [
        q("Tell me about a time you dug into data to find the real cause of a problem.",
          "Show how you stayed connected to the details.",
          ["What did the symptoms look like?", "What were you trying to find?", "How did you investigate?", "What did you find and fix?"]),
        q("Describe a time a metric looked fine but you suspected something was wrong.",
          "Explain what made you skeptical.",
          ["What metric and what context?", "What did you set out to verify?", "How did you audit it?", "What did you uncover?"]),
        q("Tell me about a time you had to learn the details of an unfamiliar system quickly.",
          "Focus on how you got to ground truth.",
          ["What system and why?", "What did you need to understand?", "How did you get to the details?", "What decision did it enable?"]),
    ]),
    ("have-backbone-disagree-and-commit", [
        q("Tell me about a time you disagreed with your manager's decision.",
          "Show how you challenged respectfully and then committed.",
          ["What was the decision?", "What was at stake for you?", "How did you make your case?", "What happened once the decision was final?"]),
        q("Describe a time you committed fully to a decision you had argued against.",
          "Highlight wholehearted execution.",
          ["What was decided?", "What did you have to deliver?", "How did you commit?", "What was the outcome?"]),
        q("Tell me about a time you stood firm on an unpopular position.",
          "Explain the conviction and the evidence behind it.",
          ["What was the position?", "Why did it matter?", "How did you hold your ground?", "How was it resolved?"]),
    ]),
    ("deliver-results", [
        q("Tell me about the most challenging goal you have delivered.",
          "Focus on key inputs, obstacles and the measurable outcome.",
          ["What was the goal and why was it hard?", "What were you accountable for?", "What did you do to get there?", "What did you deliver, in numbers?"]),
        q("Describe a time you missed a deadline or goal. What did you do?",
          "Show how you rose to the setback.",
          ["What was the goal?", "What were you responsible for?", "How did you respond when it slipped?", "What was the final result?"]),
        q("Tell me about a time you had to deliver under a tight timeline.",
          "Highlight prioritisation and execution.",
          ["What was the timeline and scope?", "What did you have to deliver?", "How did you prioritise and execute?", "Did you deliver, and with what quality?"]),
    ]),
    ("strive-to-be-earths-best-employer", [
        q("Tell me about a time you made your team a better place to work.",
          "Show a concrete change, not a general attitude.",
          ["What was the team environment?", "What did you want to improve?", "What did you change?", "How did engagement or retention change?"]),
        q("Describe a time you supported a colleague's wellbeing or growth at a cost to short-term output.",
          "Explain the trade-off.",
          ["What was the colleague's situation?", "What did you take on?", "What support did you provide?", "What was the outcome for them and the team?"]),
        q("Tell me about a time you made your team more inclusive.",
          "Focus on actions and their effect.",
          ["What was missing?", "What was your role?", "What actions did you take?", "What changed as a result?"]),
    ]),
    ("success-and-scale-bring-broad-responsibility", [
        q("Tell me about a time you considered the wider impact of a decision beyond your team.",
          "Think about second-order effects on customers, communities or partners.",
          ["What was the decision?", "Who else could be affected?", "How did you account for them?", "What was the broader outcome?"]),
        q("Describe a time you left a system, process or team better than you found it.",
          "Show lasting improvement.",
          ["What state was it in?", "What did you take responsibility for?", "What did you improve?", "What lasting difference did it make?"]),
        q("Tell me about a time you raised a concern about a potential harm from your work.",
          "Focus on responsibility at scale.",
          ["What was the work?", "What risk did you identify?", "How did you raise and address it?", "What changed?"]),
    ]),
];

/// Builds the fallback question set for the given principles.
///
/// Questions are interleaved round-robin across principles (first question of
/// each principle, then the second, ...) so the opening questions cover
/// different principles. Principles not in the catalog are skipped.
pub fn fallback_questions(principles: &[LeadershipPrinciple]) -> Vec<Question> {
    let groups: Vec<(&'static str, &[BankQuestion; 3])> = principles
        .iter()
        .filter_map(|p| find_principle(&p.title))
        .filter_map(|def| {
            BANK.iter()
                .find(|(id, _)| *id == def.id)
                .map(|(_, questions)| (def.title, questions))
        })
        .collect();

    let mut out = Vec::with_capacity(groups.len() * 3);
    for round in 0..3 {
        for (title, questions) in &groups {
            let bank = &questions[round];
            out.push(Question {
                id: format!("fallback-{}", out.len() + 1),
                principle: title.to_string(),
                question_text: bank.question.to_string(),
                context: bank.context.to_string(),
                star_framework: StarHints {
                    situation: bank.hints[0].to_string(),
                    task: bank.hints[1].to_string(),
                    action: bank.hints[2].to_string(),
                    result: bank.hints[3].to_string(),
                },
            });
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analysis::catalog::CATALOG;

    fn principle(title: &str) -> LeadershipPrinciple {
        LeadershipPrinciple {
            id: String::new(),
            title: title.to_string(),
            description: String::new(),
            relevance_score: 50,
            key_behaviors: vec!["x".to_string()],
        }
    }

    #[test]
    fn test_bank_covers_every_catalog_principle() {
        for def in CATALOG.iter() {
            assert!(
                BANK.iter().any(|(id, _)| *id == def.id),
                "no fallback questions for {}",
                def.id
            );
        }
        assert_eq!(BANK.len(), CATALOG.len());
    }

    #[test]
    fn test_three_questions_per_principle() {
        let principles = vec![principle("Ownership"), principle("Dive Deep")];
        let questions = fallback_questions(&principles);
        assert_eq!(questions.len(), 6);
        for p in &principles {
            let n = questions.iter().filter(|q| q.principle == p.title).count();
            assert_eq!(n, 3);
        }
    }

    #[test]
    fn test_questions_interleave_principles() {
        let principles = vec![principle("Ownership"), principle("Dive Deep")];
        let questions = fallback_questions(&principles);
        let order: Vec<_> = questions.iter().map(|q| q.principle.as_str()).collect();
        assert_eq!(
            order,
            vec!["Ownership", "Dive Deep", "Ownership", "Dive Deep", "Ownership", "Dive Deep"]
        );
    }

    #[test]
    fn test_ids_are_unique_and_hints_present() {
        let principles: Vec<_> = CATALOG.iter().map(|d| principle(d.title)).collect();
        let questions = fallback_questions(&principles);
        assert_eq!(questions.len(), 48);
        let ids: std::collections::HashSet<_> = questions.iter().map(|q| q.id.as_str()).collect();
        assert_eq!(ids.len(), 48);
        assert!(questions.iter().all(|q| !q.star_framework.result.is_empty()));
    }

    #[test]
    fn test_unknown_principles_are_skipped() {
        let questions = fallback_questions(&[principle("Synergy")]);
        assert!(questions.is_empty());
    }
}
